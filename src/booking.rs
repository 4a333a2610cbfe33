use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{ApiError, CatalogApi};

// Data structure for a booking record as served by the booking-info endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub guests: u32,
    #[serde(rename = "checkIn")]
    pub check_in: DateTime<Utc>,
    #[serde(rename = "checkOut")]
    pub check_out: DateTime<Utc>,
}

impl Booking {
    // The admin card shows dates only, not times
    pub fn check_in_day(&self) -> NaiveDate {
        self.check_in.date_naive()
    }

    pub fn check_out_day(&self) -> NaiveDate {
        self.check_out.date_naive()
    }
}

// The admin view over one place's bookings: fetched once, then shrunk
// locally as bookings are cancelled. An empty board renders the
// "No Bookings Found" state.
#[derive(Debug, Default)]
pub struct BookingBoard {
    bookings: Vec<Booking>,
}

impl BookingBoard {
    pub async fn load<C: CatalogApi>(client: &C, place_id: &str) -> Result<Self, ApiError> {
        let bookings = client.booking_info(place_id).await?;
        debug!(place_id, count = bookings.len(), "booking board loaded");
        Ok(Self { bookings })
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    // The booking leaves the board only once the server has accepted the
    // cancellation; a failed call leaves the list untouched.
    pub async fn cancel<C: CatalogApi>(
        &mut self,
        client: &C,
        booking_id: &str,
    ) -> Result<(), ApiError> {
        client.cancel_booking(booking_id).await?;
        self.bookings.retain(|booking| booking.id != booking_id);
        debug!(booking_id, remaining = self.bookings.len(), "booking cancelled");
        Ok(())
    }
}
