//! Service context - dependency container for services
//!
//! Holds the repository and collaborator ports the services need.

use std::sync::Arc;

use worklog_common::Environment;
use worklog_core::traits::{
    CalendarEntryRepository, CustomAttributeValidator, EmailDeliveryRepository,
    EventLogRepository, Mailer, ProjectRepository, TaskRepository, TimeParser, UserRepository,
    WorkLogNotificationRepository, WorkLogRepository,
};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to the repositories, the mailer, the time parser, the
/// custom attribute validator, and the deployment environment (which decides
/// whether notification dispatch runs inline or in the background).
#[derive(Clone)]
pub struct ServiceContext {
    environment: Environment,

    // Repositories
    work_log_repo: Arc<dyn WorkLogRepository>,
    event_log_repo: Arc<dyn EventLogRepository>,
    delivery_repo: Arc<dyn EmailDeliveryRepository>,
    calendar_repo: Arc<dyn CalendarEntryRepository>,
    task_repo: Arc<dyn TaskRepository>,
    project_repo: Arc<dyn ProjectRepository>,
    user_repo: Arc<dyn UserRepository>,
    notification_repo: Arc<dyn WorkLogNotificationRepository>,

    // Collaborators
    mailer: Arc<dyn Mailer>,
    time_parser: Arc<dyn TimeParser>,
    attribute_validator: Arc<dyn CustomAttributeValidator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        environment: Environment,
        work_log_repo: Arc<dyn WorkLogRepository>,
        event_log_repo: Arc<dyn EventLogRepository>,
        delivery_repo: Arc<dyn EmailDeliveryRepository>,
        calendar_repo: Arc<dyn CalendarEntryRepository>,
        task_repo: Arc<dyn TaskRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        user_repo: Arc<dyn UserRepository>,
        notification_repo: Arc<dyn WorkLogNotificationRepository>,
        mailer: Arc<dyn Mailer>,
        time_parser: Arc<dyn TimeParser>,
        attribute_validator: Arc<dyn CustomAttributeValidator>,
    ) -> Self {
        Self {
            environment,
            work_log_repo,
            event_log_repo,
            delivery_repo,
            calendar_repo,
            task_repo,
            project_repo,
            user_repo,
            notification_repo,
            mailer,
            time_parser,
            attribute_validator,
        }
    }

    /// Get the deployment environment
    pub fn environment(&self) -> Environment {
        self.environment
    }

    // === Repositories ===

    /// Get the work log repository
    pub fn work_log_repo(&self) -> &dyn WorkLogRepository {
        self.work_log_repo.as_ref()
    }

    /// Get the event log repository
    pub fn event_log_repo(&self) -> &dyn EventLogRepository {
        self.event_log_repo.as_ref()
    }

    /// Get the email delivery repository
    pub fn delivery_repo(&self) -> &dyn EmailDeliveryRepository {
        self.delivery_repo.as_ref()
    }

    /// Get the calendar entry repository
    pub fn calendar_repo(&self) -> &dyn CalendarEntryRepository {
        self.calendar_repo.as_ref()
    }

    /// Get the task repository
    pub fn task_repo(&self) -> &dyn TaskRepository {
        self.task_repo.as_ref()
    }

    /// Get the project repository
    pub fn project_repo(&self) -> &dyn ProjectRepository {
        self.project_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the work log notification repository
    pub fn notification_repo(&self) -> &dyn WorkLogNotificationRepository {
        self.notification_repo.as_ref()
    }

    // === Collaborators ===

    /// Get the mailer
    pub fn mailer(&self) -> &dyn Mailer {
        self.mailer.as_ref()
    }

    /// Get the time parser
    pub fn time_parser(&self) -> &dyn TimeParser {
        self.time_parser.as_ref()
    }

    /// Get the custom attribute validator
    pub fn attribute_validator(&self) -> &dyn CustomAttributeValidator {
        self.attribute_validator.as_ref()
    }
}
