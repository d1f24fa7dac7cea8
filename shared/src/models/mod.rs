//! Domain models shared between the reservation server and its clients

pub mod reservation;
pub mod slot;
pub mod table;

pub use reservation::{
    CancelResponse, CustomerInfo, Reservation, ReservationCreate, ReservationId,
    ReservationListResponse, ReserveResponse,
};
pub use slot::{
    DinnerRound, MealPeriod, ParseMealPeriodError, SlotCatalogView, SlotKey, TimeId,
};
pub use table::{
    AvailabilityResponse, ConfigResponse, Table, TableId, TableSeatStatus, TableStatusResponse,
};
