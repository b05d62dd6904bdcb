//! Application state and composition.

use std::sync::Arc;

use anyhow::Context;

use crate::config::EngineConfig;
use crate::infrastructure::{
    clock::SystemClock,
    memory_repo::InMemoryAppointmentRepo,
    notifications::{LogNotifier, ResendNotifier},
    ports::{AppointmentRepo, ClockPort, NotificationPort, UserDirectory},
    user_directory::{HttpUserDirectory, StaticUserDirectory},
};
use crate::telemetry::init_tracing;
use crate::use_cases::appointments::{
    AppointmentUseCases, ChangeAppointmentStatus, CreateAppointment, DeleteAppointment,
    GetAppointment, ListAppointments, ParticipantNotifier, RescheduleAppointment,
    UpdateAppointment,
};

/// Main application state.
///
/// Holds the use cases and the ports they were built from.
pub struct App {
    pub use_cases: UseCases,
    pub appointment_repo: Arc<dyn AppointmentRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub appointments: AppointmentUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        appointment_repo: Arc<dyn AppointmentRepo>,
        notifier: Arc<dyn NotificationPort>,
        directory: Arc<dyn UserDirectory>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let participants = Arc::new(ParticipantNotifier::new(notifier, directory));

        let appointments = AppointmentUseCases::new(
            Arc::new(CreateAppointment::new(
                appointment_repo.clone(),
                clock.clone(),
                participants.clone(),
            )),
            Arc::new(GetAppointment::new(appointment_repo.clone())),
            Arc::new(ListAppointments::new(appointment_repo.clone())),
            Arc::new(UpdateAppointment::new(
                appointment_repo.clone(),
                clock.clone(),
                participants.clone(),
            )),
            Arc::new(ChangeAppointmentStatus::new(
                appointment_repo.clone(),
                clock.clone(),
                participants.clone(),
            )),
            Arc::new(RescheduleAppointment::new(
                appointment_repo.clone(),
                clock.clone(),
                participants.clone(),
            )),
            Arc::new(DeleteAppointment::new(
                appointment_repo.clone(),
                clock,
                participants,
            )),
        );

        Self {
            use_cases: UseCases { appointments },
            appointment_repo,
        }
    }

    /// Load configuration from the environment, install logging, and build
    /// the default adapters.
    pub fn bootstrap() -> anyhow::Result<Self> {
        let config = EngineConfig::from_env()?;
        init_tracing(&config.log_filter).context("Failed to install tracing subscriber")?;

        tracing::info!(
            notifications = if config.resend_api_key.is_some() { "resend" } else { "log" },
            user_directory = config.auth_service_url.as_deref().unwrap_or("static"),
            "Starting Tutorbook engine"
        );

        Ok(Self::from_config(&config))
    }

    /// Build the default adapter set for `config`: in-memory storage, Resend
    /// (or log-only) notifications, and the HTTP user directory when configured.
    pub fn from_config(config: &EngineConfig) -> Self {
        let notifier: Arc<dyn NotificationPort> = match &config.resend_api_key {
            Some(api_key) => {
                tracing::info!(base_url = %config.resend_base_url, "Email notifications via Resend");
                Arc::new(ResendNotifier::new(
                    &config.resend_base_url,
                    api_key,
                    config.from_email.as_str(),
                    config.http_timeout_secs,
                ))
            }
            None => {
                tracing::warn!("RESEND_API_KEY not set, notifications will only be logged");
                Arc::new(LogNotifier::new())
            }
        };

        let directory: Arc<dyn UserDirectory> = match &config.auth_service_url {
            Some(url) => {
                let directory = HttpUserDirectory::new(url, config.http_timeout_secs);
                match &config.auth_service_token {
                    Some(token) => Arc::new(directory.with_bearer_token(token.clone())),
                    None => Arc::new(directory),
                }
            }
            None => {
                tracing::warn!("AUTH_SERVICE_URL not set, notification recipients cannot be resolved");
                Arc::new(StaticUserDirectory::default())
            }
        };

        Self::new(
            Arc::new(InMemoryAppointmentRepo::new()),
            notifier,
            directory,
            Arc::new(SystemClock::new()),
        )
    }
}
