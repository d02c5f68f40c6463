//! EmailDelivery entity <-> model mapper

use worklog_core::entities::{DeliveryStatus, EmailDelivery};
use worklog_core::error::DomainError;

use crate::models::EmailDeliveryModel;

/// Convert EmailDeliveryModel to EmailDelivery entity; fails on an unknown status
impl TryFrom<EmailDeliveryModel> for EmailDelivery {
    type Error = DomainError;

    fn try_from(model: EmailDeliveryModel) -> Result<Self, Self::Error> {
        let status = DeliveryStatus::parse(&model.status).ok_or_else(|| {
            DomainError::DatabaseError(format!(
                "email_deliveries.{}: unknown status {:?}",
                model.id, model.status
            ))
        })?;

        Ok(EmailDelivery {
            id: model.id,
            work_log_id: model.work_log_id,
            email_address_id: model.email_address_id,
            status,
            created_at: model.created_at,
        })
    }
}
