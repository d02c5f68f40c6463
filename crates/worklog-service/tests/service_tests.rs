//! Service tests against in-memory fakes
//!
//! Every port is backed by a shared in-memory store so the lifecycle hooks
//! and the notification fan-out can be observed end to end without a
//! database or an SMTP server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use worklog_common::Environment;
use worklog_core::{
    AccessLevel, CalendarEntryRepository, DeliveryStatus, EmailAddress, EmailDelivery,
    EmailDeliveryRepository, EventLog, EventLogRepository, LogType, MailAttachment, Mailer,
    PermissiveAttributeValidator, Project, ProjectRepository, RepoResult, Task, TaskRepository,
    UpdateKind, User, UserRepository, WorkLog, WorkLogNotificationRepository, WorkLogRepository,
};
use worklog_service::{
    DefaultTimeParser, LogWorkRequest, NotificationService, ServiceContext, WorkLogService,
};

// ============================================================================
// In-memory store and fakes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct SentMail {
    template: &'static str,
    recipient: String,
    body: String,
}

#[derive(Default)]
struct Store {
    next_id: Mutex<i64>,
    work_logs: Mutex<Vec<WorkLog>>,
    event_logs: Mutex<Vec<EventLog>>,
    deliveries: Mutex<Vec<EmailDelivery>>,
    calendar_deletions: Mutex<Vec<i64>>,
    tasks: Mutex<Vec<Task>>,
    task_customers: Mutex<Vec<(i64, i64)>>,
    task_addresses: Mutex<Vec<(i64, EmailAddress)>>,
    assigned: Mutex<Vec<(i64, User)>>,
    watchers: Mutex<Vec<(i64, User)>>,
    projects: Mutex<Vec<Project>>,
    users: Mutex<Vec<User>>,
    addresses: Mutex<Vec<EmailAddress>>,
    notified: Mutex<HashMap<i64, Vec<i64>>>,
    recalc_calls: Mutex<Vec<i64>>,
    unread_calls: Mutex<Vec<(i64, Vec<i64>)>>,
    sent_mails: Mutex<Vec<SentMail>>,
}

impl Store {
    fn alloc_id(&self) -> i64 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }
}

struct FakeWorkLogs(Arc<Store>);

#[async_trait]
impl WorkLogRepository for FakeWorkLogs {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<WorkLog>> {
        Ok(self.0.work_logs.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn create(&self, work_log: &WorkLog) -> RepoResult<WorkLog> {
        let created = WorkLog { id: self.0.alloc_id(), ..work_log.clone() };
        self.0.work_logs.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, work_log: &WorkLog) -> RepoResult<()> {
        let mut logs = self.0.work_logs.lock().unwrap();
        if let Some(existing) = logs.iter_mut().find(|l| l.id == work_log.id) {
            *existing = work_log.clone();
        }
        Ok(())
    }

    async fn update_body(&self, id: i64, body: &str) -> RepoResult<()> {
        let mut logs = self.0.work_logs.lock().unwrap();
        if let Some(existing) = logs.iter_mut().find(|l| l.id == id) {
            existing.body = body.to_string();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.0.work_logs.lock().unwrap().retain(|l| l.id != id);
        Ok(())
    }

    async fn total_duration(&self, task_id: i64) -> RepoResult<i64> {
        Ok(self
            .0
            .work_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.task_id == task_id)
            .map(|l| l.duration)
            .sum())
    }

    async fn comments(&self) -> RepoResult<Vec<WorkLog>> {
        Ok(self
            .0
            .work_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.is_comment())
            .cloned()
            .collect())
    }

    async fn on_tasks_owned_by(&self, user_id: i64) -> RepoResult<Vec<WorkLog>> {
        let assigned = self.0.assigned.lock().unwrap();
        let task_ids: Vec<i64> = assigned
            .iter()
            .filter(|(_, u)| u.id == user_id)
            .map(|(task_id, _)| *task_id)
            .collect();
        Ok(self
            .0
            .work_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| task_ids.contains(&l.task_id))
            .cloned()
            .collect())
    }

    async fn accessed_by(&self, user: &User) -> RepoResult<Vec<WorkLog>> {
        Ok(self
            .0
            .work_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.company_id == user.company_id && l.access_level.visible_to(user.access_level))
            .cloned()
            .collect())
    }

    async fn level_accessed_by(&self, user: &User) -> RepoResult<Vec<WorkLog>> {
        Ok(self
            .0
            .work_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.access_level.visible_to(user.access_level))
            .cloned()
            .collect())
    }

    async fn all_accessed_by(&self, user: &User) -> RepoResult<Vec<WorkLog>> {
        self.level_accessed_by(user).await
    }
}

struct FakeEventLogs(Arc<Store>);

#[async_trait]
impl EventLogRepository for FakeEventLogs {
    async fn create(&self, event_log: &EventLog) -> RepoResult<EventLog> {
        let created = EventLog { id: self.0.alloc_id(), ..event_log.clone() };
        self.0.event_logs.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_work_log(&self, work_log_id: i64) -> RepoResult<Option<EventLog>> {
        Ok(self
            .0
            .event_logs
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.work_log_id == work_log_id)
            .cloned())
    }

    async fn sync_created_at(&self, work_log_id: i64, created_at: DateTime<Utc>) -> RepoResult<()> {
        let mut events = self.0.event_logs.lock().unwrap();
        if let Some(event) = events.iter_mut().find(|e| e.work_log_id == work_log_id) {
            event.created_at = created_at;
        }
        Ok(())
    }
}

struct FakeDeliveries(Arc<Store>);

#[async_trait]
impl EmailDeliveryRepository for FakeDeliveries {
    async fn create(&self, delivery: &EmailDelivery) -> RepoResult<EmailDelivery> {
        let created = EmailDelivery { id: self.0.alloc_id(), ..delivery.clone() };
        self.0.deliveries.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_queued(&self, work_log_id: i64) -> RepoResult<Vec<EmailDelivery>> {
        Ok(self
            .0
            .deliveries
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.work_log_id == work_log_id && d.status == DeliveryStatus::Queued)
            .cloned()
            .collect())
    }

    async fn mark_sent(&self, id: i64) -> RepoResult<()> {
        let mut deliveries = self.0.deliveries.lock().unwrap();
        if let Some(delivery) = deliveries.iter_mut().find(|d| d.id == id) {
            delivery.status = DeliveryStatus::Sent;
        }
        Ok(())
    }

    async fn email_address(&self, delivery_id: i64) -> RepoResult<Option<EmailAddress>> {
        let address_id = self
            .0
            .deliveries
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id == delivery_id)
            .map(|d| d.email_address_id);
        let Some(address_id) = address_id else {
            return Ok(None);
        };
        if let Some(found) = self.0.addresses.lock().unwrap().iter().find(|a| a.id == address_id) {
            return Ok(Some(found.clone()));
        }
        // Task-registered addresses live in their own list in the store
        Ok(self
            .0
            .task_addresses
            .lock()
            .unwrap()
            .iter()
            .find(|(_, a)| a.id == address_id)
            .map(|(_, a)| a.clone()))
    }
}

struct FakeCalendar(Arc<Store>);

#[async_trait]
impl CalendarEntryRepository for FakeCalendar {
    async fn delete_for_work_log(&self, work_log_id: i64) -> RepoResult<()> {
        self.0.calendar_deletions.lock().unwrap().push(work_log_id);
        Ok(())
    }
}

struct FakeTasks(Arc<Store>);

#[async_trait]
impl TaskRepository for FakeTasks {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Task>> {
        Ok(self.0.tasks.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn customer_ids(&self, task_id: i64) -> RepoResult<Vec<i64>> {
        Ok(self
            .0
            .task_customers
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| *t == task_id)
            .map(|(_, c)| *c)
            .collect())
    }

    async fn email_addresses(&self, task_id: i64) -> RepoResult<Vec<EmailAddress>> {
        Ok(self
            .0
            .task_addresses
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| *t == task_id)
            .map(|(_, a)| a.clone())
            .collect())
    }

    async fn assigned_users(&self, task_id: i64) -> RepoResult<Vec<User>> {
        Ok(self
            .0
            .assigned
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| *t == task_id)
            .map(|(_, u)| u.clone())
            .collect())
    }

    async fn users_to_notify(
        &self,
        task_id: i64,
        acting_user_id: Option<i64>,
    ) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = Vec::new();
        let assigned = self.0.assigned.lock().unwrap();
        let watchers = self.0.watchers.lock().unwrap();
        for (t, user) in assigned.iter().chain(watchers.iter()) {
            if *t != task_id || Some(user.id) == acting_user_id {
                continue;
            }
            if !users.iter().any(|u| u.id == user.id) {
                users.push(user.clone());
            }
        }
        Ok(users)
    }

    async fn recalculate_worked_minutes(&self, task_id: i64) -> RepoResult<i64> {
        self.0.recalc_calls.lock().unwrap().push(task_id);
        let seconds: i64 = self
            .0
            .work_logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.task_id == task_id)
            .map(|l| l.duration)
            .sum();
        let minutes = seconds / 60;
        let mut tasks = self.0.tasks.lock().unwrap();
        if let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) {
            task.worked_minutes = minutes;
        }
        Ok(minutes)
    }

    async fn mark_unread(&self, task_id: i64, excluded_user_ids: &[i64]) -> RepoResult<()> {
        self.0
            .unread_calls
            .lock()
            .unwrap()
            .push((task_id, excluded_user_ids.to_vec()));
        Ok(())
    }
}

struct FakeProjects(Arc<Store>);

#[async_trait]
impl ProjectRepository for FakeProjects {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Project>> {
        Ok(self.0.projects.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }
}

struct FakeUsers(Arc<Store>);

#[async_trait]
impl UserRepository for FakeUsers {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.0.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn default_email_address(&self, user_id: i64) -> RepoResult<Option<EmailAddress>> {
        Ok(self
            .0
            .addresses
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user_id == Some(user_id) && a.is_default)
            .cloned())
    }

    async fn find_email_address(&self, id: i64) -> RepoResult<Option<EmailAddress>> {
        Ok(self.0.addresses.lock().unwrap().iter().find(|a| a.id == id).cloned())
    }
}

struct FakeNotifications(Arc<Store>);

#[async_trait]
impl WorkLogNotificationRepository for FakeNotifications {
    async fn replace(&self, work_log_id: i64, user_ids: &[i64]) -> RepoResult<()> {
        self.0
            .notified
            .lock()
            .unwrap()
            .insert(work_log_id, user_ids.to_vec());
        Ok(())
    }

    async fn notified_user_ids(&self, work_log_id: i64) -> RepoResult<Vec<i64>> {
        Ok(self
            .0
            .notified
            .lock()
            .unwrap()
            .get(&work_log_id)
            .cloned()
            .unwrap_or_default())
    }
}

struct FakeMailer(Arc<Store>);

#[async_trait]
impl Mailer for FakeMailer {
    async fn changed(
        &self,
        _update_kind: UpdateKind,
        _task: &Task,
        _author: &User,
        recipient: &str,
        body: &str,
        _attachments: &[MailAttachment],
    ) -> Result<(), worklog_core::DomainError> {
        self.0.sent_mails.lock().unwrap().push(SentMail {
            template: "changed",
            recipient: recipient.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }

    async fn created(
        &self,
        _task: &Task,
        _author: &User,
        recipient: &str,
        _attachments: &[MailAttachment],
    ) -> Result<(), worklog_core::DomainError> {
        self.0.sent_mails.lock().unwrap().push(SentMail {
            template: "created",
            recipient: recipient.to_string(),
            body: String::new(),
        });
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn context(store: &Arc<Store>) -> ServiceContext {
    ServiceContext::new(
        Environment::Development,
        Arc::new(FakeWorkLogs(store.clone())),
        Arc::new(FakeEventLogs(store.clone())),
        Arc::new(FakeDeliveries(store.clone())),
        Arc::new(FakeCalendar(store.clone())),
        Arc::new(FakeTasks(store.clone())),
        Arc::new(FakeProjects(store.clone())),
        Arc::new(FakeUsers(store.clone())),
        Arc::new(FakeNotifications(store.clone())),
        Arc::new(FakeMailer(store.clone())),
        Arc::new(DefaultTimeParser),
        Arc::new(PermissiveAttributeValidator),
    )
}

fn user(id: i64, name: &str, level: i32) -> User {
    User {
        id,
        name: name.to_string(),
        company_id: 1,
        access_level: AccessLevel::new(level),
        utc_offset_minutes: 0,
    }
}

fn address(id: i64, email: &str, user_id: Option<i64>) -> EmailAddress {
    EmailAddress {
        id,
        email: email.to_string(),
        display_name: None,
        user_id,
        is_default: user_id.is_some(),
    }
}

/// Store seeded with one company, one project (customer 50), and one task
fn seeded_store() -> Arc<Store> {
    let store = Arc::new(Store::default());
    store.projects.lock().unwrap().push(Project {
        id: 1,
        name: "Backend".to_string(),
        company_id: 1,
        customer_id: Some(50),
        completed_at: None,
    });
    store.tasks.lock().unwrap().push(Task {
        id: 1,
        name: "Fix the build".to_string(),
        project_id: 1,
        company_id: 1,
        description: "CI is red".to_string(),
        worked_minutes: 0,
    });
    store
}

fn seed_user(store: &Arc<Store>, user: &User, email: &str) {
    let id = store.alloc_id();
    store
        .addresses
        .lock()
        .unwrap()
        .push(address(id, email, Some(user.id)));
    store.users.lock().unwrap().push(user.clone());
}

// ============================================================================
// Construction paths
// ============================================================================

#[tokio::test]
async fn test_build_returns_none_for_empty_request() {
    let store = seeded_store();
    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);
    let task = store.tasks.lock().unwrap()[0].clone();
    let alice = user(10, "Alice", 1);

    let request = LogWorkRequest::default();
    let built = service
        .build_work_added_or_comment(&task, &alice, &request)
        .await
        .unwrap();
    assert!(built.is_none());

    let request = LogWorkRequest {
        duration: Some("  ".to_string()),
        started_at: None,
        comment: Some(String::new()),
    };
    let built = service
        .build_work_added_or_comment(&task, &alice, &request)
        .await
        .unwrap();
    assert!(built.is_none());
}

#[tokio::test]
async fn test_build_comment_only() {
    let store = seeded_store();
    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);
    let task = store.tasks.lock().unwrap()[0].clone();
    let alice = user(10, "Alice", 1);

    let request = LogWorkRequest {
        duration: None,
        started_at: None,
        comment: Some("looks good to me".to_string()),
    };
    let log = service
        .build_work_added_or_comment(&task, &alice, &request)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(log.log_type, LogType::TaskComment);
    assert!(log.comment);
    assert_eq!(log.duration, 0);
    assert_eq!(log.body, "looks good to me");
    assert_eq!(log.user_id, Some(10));
    // Customer falls back to the project's customer
    assert_eq!(log.customer_id, Some(50));
}

#[tokio::test]
async fn test_build_with_duration_becomes_work_added() {
    let store = seeded_store();
    store.task_customers.lock().unwrap().push((1, 77));
    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);
    let task = store.tasks.lock().unwrap()[0].clone();
    let alice = user(10, "Alice", 1);

    let request = LogWorkRequest {
        duration: Some("1:30".to_string()),
        started_at: None,
        comment: Some("paired on this".to_string()),
    };
    let log = service
        .build_work_added_or_comment(&task, &alice, &request)
        .await
        .unwrap()
        .unwrap();

    // Logged time wins the type; the comment flag survives
    assert_eq!(log.log_type, LogType::WorkAdded);
    assert!(log.comment);
    assert_eq!(log.duration, 5400);
    assert_eq!(log.body, "paired on this");
    // The task's own customer beats the project fallback
    assert_eq!(log.customer_id, Some(77));
}

#[tokio::test]
async fn test_build_rejects_unparseable_duration() {
    let store = seeded_store();
    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);
    let task = store.tasks.lock().unwrap()[0].clone();
    let alice = user(10, "Alice", 1);

    let request = LogWorkRequest {
        duration: Some("soonish".to_string()),
        started_at: None,
        comment: None,
    };
    let result = service
        .build_work_added_or_comment(&task, &alice, &request)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_create_for_new_task_copies_description() {
    let store = seeded_store();
    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);
    let task = store.tasks.lock().unwrap()[0].clone();
    let alice = user(10, "Alice", 1);

    let log = service.create_for_new_task(&task, &alice).await.unwrap();

    assert_eq!(log.log_type, LogType::TaskCreated);
    assert_eq!(log.body, "CI is red");
    assert_eq!(log.user_id, Some(10));
    assert!(log.id > 0);
    // The audit entry is paired immediately
    let events = store.event_logs.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].work_log_id, log.id);
    assert_eq!(events[0].created_at, log.started_at);
}

// ============================================================================
// Lifecycle hooks
// ============================================================================

#[tokio::test]
async fn test_create_with_duration_recalculates_worked_minutes() {
    let store = seeded_store();
    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);

    let mut log = WorkLog::for_task(1, 1, 1, None);
    log.user_id = Some(10);
    log.log_type = LogType::WorkAdded;
    log.duration = 2700;
    service.create(&log).await.unwrap();

    assert_eq!(store.recalc_calls.lock().unwrap().as_slice(), &[1]);
    assert_eq!(store.tasks.lock().unwrap()[0].worked_minutes, 45);
}

#[tokio::test]
async fn test_create_without_duration_skips_recalculation() {
    let store = seeded_store();
    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);

    let mut log = WorkLog::for_task(1, 1, 1, None);
    log.user_id = Some(10);
    log.log_type = LogType::TaskComment;
    log.comment = true;
    service.create(&log).await.unwrap();

    assert!(store.recalc_calls.lock().unwrap().is_empty());
    // The audit entry is still paired
    assert_eq!(store.event_logs.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_rejects_negative_duration() {
    let store = seeded_store();
    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);

    let mut log = WorkLog::for_task(1, 1, 1, None);
    log.duration = -5;
    assert!(service.create(&log).await.is_err());
    assert!(store.work_logs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_invalidates_calendar_and_resyncs_audit_entry() {
    let store = seeded_store();
    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);

    let mut log = WorkLog::for_task(1, 1, 1, None);
    log.user_id = Some(10);
    log.log_type = LogType::WorkAdded;
    log.duration = 600;
    let mut log = service.create(&log).await.unwrap();

    log.started_at = log.started_at - chrono::Duration::hours(2);
    log.duration = 1200;
    service.update(&log).await.unwrap();

    assert_eq!(store.calendar_deletions.lock().unwrap().as_slice(), &[log.id]);
    let events = store.event_logs.lock().unwrap();
    assert_eq!(events[0].created_at, log.started_at);
    drop(events);
    // Once on create, once on update
    assert_eq!(store.recalc_calls.lock().unwrap().len(), 2);
    assert_eq!(store.tasks.lock().unwrap()[0].worked_minutes, 20);
}

#[tokio::test]
async fn test_destroy_recalculates_when_entry_carried_time() {
    let store = seeded_store();
    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);

    let mut log = WorkLog::for_task(1, 1, 1, None);
    log.user_id = Some(10);
    log.log_type = LogType::WorkAdded;
    log.duration = 3600;
    let log = service.create(&log).await.unwrap();
    assert_eq!(store.tasks.lock().unwrap()[0].worked_minutes, 60);

    service.destroy(log.id).await.unwrap();

    assert!(store.work_logs.lock().unwrap().is_empty());
    assert_eq!(store.recalc_calls.lock().unwrap().len(), 2);
    assert_eq!(store.tasks.lock().unwrap()[0].worked_minutes, 0);
}

#[tokio::test]
async fn test_destroy_recalculates_even_without_duration() {
    let store = seeded_store();
    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);

    let mut log = WorkLog::for_task(1, 1, 1, None);
    log.user_id = Some(10);
    log.log_type = LogType::TaskComment;
    log.comment = true;
    let log = service.create(&log).await.unwrap();
    // A zero-duration entry creates without recalculating
    assert!(store.recalc_calls.lock().unwrap().is_empty());

    service.destroy(log.id).await.unwrap();

    assert!(store.work_logs.lock().unwrap().is_empty());
    assert_eq!(store.recalc_calls.lock().unwrap().as_slice(), &[1]);
}

#[tokio::test]
async fn test_author_falls_back_to_email_placeholder() {
    let store = seeded_store();
    store
        .addresses
        .lock()
        .unwrap()
        .push(address(40, "reply@example.com", None));
    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);

    let mut log = WorkLog::for_task(1, 1, 1, None);
    log.email_address_id = Some(40);
    let author = service.author_of(&log).await.unwrap();
    assert!(author.is_placeholder());
    assert_eq!(author.name, "Unknown User (reply@example.com)");
}

// ============================================================================
// Notification fan-out
// ============================================================================

#[tokio::test]
async fn test_notify_comment_fans_out_to_watchers_and_task_addresses() {
    let store = seeded_store();
    let alice = user(10, "Alice", 2);
    let bob = user(11, "Bob", 2);
    seed_user(&store, &alice, "alice@example.com");
    seed_user(&store, &bob, "bob@example.com");
    store.assigned.lock().unwrap().push((1, bob.clone()));
    store
        .task_addresses
        .lock()
        .unwrap()
        .push((1, address(90, "external@example.com", None)));

    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);
    let mut log = WorkLog::for_task(1, 1, 1, None);
    log.user_id = Some(alice.id);
    log.log_type = LogType::TaskComment;
    log.comment = true;
    log.body = "done, please review".to_string();
    let log = service.create(&log).await.unwrap();

    let notifier = NotificationService::new(ctx.clone());
    notifier
        .notify(log.id, UpdateKind::Comment, Vec::new())
        .await
        .unwrap();

    // Bob was recorded as notified; the external address gets mail too
    assert_eq!(store.notified.lock().unwrap()[&log.id], vec![bob.id]);
    let mails = store.sent_mails.lock().unwrap().clone();
    assert_eq!(mails.len(), 2);
    assert!(mails.iter().all(|m| m.template == "changed"));
    let recipients: Vec<&str> = mails.iter().map(|m| m.recipient.as_str()).collect();
    assert!(recipients.contains(&"external@example.com"));
    assert!(recipients.contains(&"bob@example.com"));
    assert!(mails[0].body.starts_with("Alice:\n"));

    // Every delivery ended up sent
    let deliveries = store.deliveries.lock().unwrap();
    assert_eq!(deliveries.len(), 2);
    assert!(deliveries.iter().all(|d| d.status == DeliveryStatus::Sent));
}

#[tokio::test]
async fn test_notify_appends_one_trailer_block() {
    let store = seeded_store();
    let alice = user(10, "Alice", 1);
    let bob = user(11, "Bob", 1);
    let carol = user(12, "Carol", 1);
    seed_user(&store, &alice, "alice@example.com");
    seed_user(&store, &bob, "bob@example.com");
    seed_user(&store, &carol, "carol@example.com");
    store.assigned.lock().unwrap().push((1, bob.clone()));
    store.watchers.lock().unwrap().push((1, carol.clone()));

    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);
    let mut log = WorkLog::for_task(1, 1, 1, None);
    log.user_id = Some(alice.id);
    log.log_type = LogType::TaskComment;
    log.comment = true;
    log.body = "shipped".to_string();
    let log = service.create(&log).await.unwrap();

    let notifier = NotificationService::new(ctx.clone());
    notifier
        .notify(log.id, UpdateKind::Comment, Vec::new())
        .await
        .unwrap();

    let body = store
        .work_logs
        .lock()
        .unwrap()
        .iter()
        .find(|l| l.id == log.id)
        .map(|l| l.body.clone())
        .unwrap();
    assert!(body.starts_with("shipped\n\nNotification emails sent to "));
    assert_eq!(body.matches("Notification emails sent to").count(), 1);
    assert!(body.contains("bob@example.com"));
    assert!(body.contains("carol@example.com"));
}

#[tokio::test]
async fn test_notify_excludes_users_below_access_level() {
    let store = seeded_store();
    let alice = user(10, "Alice", 3);
    let bob = user(11, "Bob", 3);
    let intern = user(12, "Intern", 1);
    seed_user(&store, &alice, "alice@example.com");
    seed_user(&store, &bob, "bob@example.com");
    seed_user(&store, &intern, "intern@example.com");
    store.assigned.lock().unwrap().push((1, bob.clone()));
    store.assigned.lock().unwrap().push((1, intern.clone()));

    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);
    let mut log = WorkLog::for_task(1, 1, 1, None);
    log.user_id = Some(alice.id);
    log.access_level = AccessLevel::new(2);
    log.log_type = LogType::TaskComment;
    log.comment = true;
    log.body = "restricted note".to_string();
    let log = service.create(&log).await.unwrap();

    let notifier = NotificationService::new(ctx.clone());
    notifier
        .notify(log.id, UpdateKind::Comment, Vec::new())
        .await
        .unwrap();

    // Only Bob clears the threshold
    assert_eq!(store.notified.lock().unwrap()[&log.id], vec![bob.id]);
    let mails = store.sent_mails.lock().unwrap().clone();
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].recipient, "bob@example.com");

    // The unread flag skips the intern and the author
    let unread = store.unread_calls.lock().unwrap();
    assert_eq!(unread.len(), 1);
    let (task_id, excluded) = &unread[0];
    assert_eq!(*task_id, 1);
    assert!(excluded.contains(&intern.id));
    assert!(excluded.contains(&alice.id));
    assert!(!excluded.contains(&bob.id));
}

#[tokio::test]
async fn test_notify_dedupes_addresses() {
    let store = seeded_store();
    let alice = user(10, "Alice", 1);
    let bob = user(11, "Bob", 1);
    seed_user(&store, &alice, "alice@example.com");
    seed_user(&store, &bob, "bob@example.com");
    store.assigned.lock().unwrap().push((1, bob.clone()));
    // Bob's address is also registered directly on the task
    store
        .task_addresses
        .lock()
        .unwrap()
        .push((1, address(91, "Bob@Example.com", None)));

    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);
    let mut log = WorkLog::for_task(1, 1, 1, None);
    log.user_id = Some(alice.id);
    log.log_type = LogType::TaskComment;
    log.comment = true;
    log.body = "one mail only".to_string();
    let log = service.create(&log).await.unwrap();

    let notifier = NotificationService::new(ctx.clone());
    notifier
        .notify(log.id, UpdateKind::Comment, Vec::new())
        .await
        .unwrap();

    assert_eq!(store.deliveries.lock().unwrap().len(), 1);
    assert_eq!(store.sent_mails.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_notify_sends_nothing_for_plain_modification() {
    let store = seeded_store();
    let alice = user(10, "Alice", 1);
    let bob = user(11, "Bob", 1);
    seed_user(&store, &alice, "alice@example.com");
    seed_user(&store, &bob, "bob@example.com");
    store.assigned.lock().unwrap().push((1, bob.clone()));

    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);
    let mut log = WorkLog::for_task(1, 1, 1, None);
    log.user_id = Some(alice.id);
    log.log_type = LogType::TaskModified;
    let log = service.create(&log).await.unwrap();

    let notifier = NotificationService::new(ctx.clone());
    notifier
        .notify(log.id, UpdateKind::Status, Vec::new())
        .await
        .unwrap();

    // Deliveries are queued but no template matches, so nothing goes out
    assert!(store.sent_mails.lock().unwrap().is_empty());
    let deliveries = store.deliveries.lock().unwrap();
    assert_eq!(deliveries.len(), 1);
    assert!(deliveries.iter().all(|d| d.status == DeliveryStatus::Queued));
}

#[tokio::test]
async fn test_notify_task_created_uses_created_template() {
    let store = seeded_store();
    let alice = user(10, "Alice", 1);
    let bob = user(11, "Bob", 1);
    seed_user(&store, &alice, "alice@example.com");
    seed_user(&store, &bob, "bob@example.com");
    store.watchers.lock().unwrap().push((1, bob.clone()));

    let ctx = context(&store);
    let service = WorkLogService::new(&ctx);
    let task = store.tasks.lock().unwrap()[0].clone();
    let log = service.create_for_new_task(&task, &alice).await.unwrap();

    let notifier = NotificationService::new(ctx.clone());
    notifier
        .notify(log.id, UpdateKind::Comment, Vec::new())
        .await
        .unwrap();

    let mails = store.sent_mails.lock().unwrap().clone();
    assert_eq!(mails.len(), 1);
    assert_eq!(mails[0].template, "created");
    assert_eq!(mails[0].recipient, "bob@example.com");
}
