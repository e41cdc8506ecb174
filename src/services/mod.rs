use crate::database::Database;

pub mod catalog;
pub mod reservation;

pub use reservation::ReservationError;

// Каталог и бронирование работают напрямую поверх БД,
// никакого состояния в памяти сервис не держит.
#[derive(Clone)]
pub struct BookingService {
    db: Database,
}

impl BookingService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}
