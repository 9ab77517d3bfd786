//! Business logic services

pub mod availability;
pub mod schedules;

use std::sync::Arc;

use crate::repository::{BookingStore, Repository, ScheduleStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub availability: availability::AvailabilityService,
    pub schedules: schedules::SchedulesService,
}

impl Services {
    /// Create all services on top of the PostgreSQL repository
    pub fn new(repository: Repository) -> Self {
        let repository = Arc::new(repository);
        Self::with_stores(repository.clone(), repository)
    }

    /// Create all services over arbitrary stores
    pub fn with_stores(schedules: Arc<dyn ScheduleStore>, bookings: Arc<dyn BookingStore>) -> Self {
        Self {
            availability: availability::AvailabilityService::new(schedules.clone(), bookings),
            schedules: schedules::SchedulesService::new(schedules),
        }
    }
}
