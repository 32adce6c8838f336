use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use mockall::mock;
use slotbook_core::models::{
    booking::{Booking, NewBooking},
    ids::{BookingId, OperatorId},
    operator::Operator,
};

use crate::repositories::{BookingRepository, LedgerWrite, OperatorRepository};

// Mock repositories for testing
mock! {
    pub OperatorRepo {}

    #[async_trait]
    impl OperatorRepository for OperatorRepo {
        async fn insert_operator(
            &self,
            id: &OperatorId,
            name: &str,
        ) -> eyre::Result<Option<Operator>>;

        async fn operator_exists(
            &self,
            id: &OperatorId,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub BookingRepo {}

    #[async_trait]
    impl BookingRepository for BookingRepo {
        async fn insert_booking(
            &self,
            booking: &NewBooking,
        ) -> eyre::Result<Option<Booking>>;

        async fn get_booking(
            &self,
            id: &BookingId,
        ) -> eyre::Result<Option<Booking>>;

        async fn find_booked(
            &self,
            operator_id: &OperatorId,
            date: NaiveDate,
            start: NaiveTime,
            end: NaiveTime,
        ) -> eyre::Result<Option<Booking>>;

        async fn reschedule_booking(
            &self,
            id: &BookingId,
            date: NaiveDate,
            start: NaiveTime,
            end: NaiveTime,
        ) -> eyre::Result<LedgerWrite>;

        async fn cancel_booking(
            &self,
            id: &BookingId,
        ) -> eyre::Result<Option<Booking>>;

        async fn booked_for_date(
            &self,
            operator_id: &OperatorId,
            date: NaiveDate,
        ) -> eyre::Result<Vec<Booking>>;
    }
}
