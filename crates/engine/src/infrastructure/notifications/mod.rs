//! Notification adapters and the message text they share.

mod log_notifier;
mod resend;

pub use log_notifier::LogNotifier;
pub use resend::{ResendNotifier, DEFAULT_RESEND_BASE_URL};

use tutorbook_domain::UserRole;

use crate::infrastructure::ports::{Notification, NotificationKind};

/// Subject line for a notification, tailored to the recipient's role.
pub fn subject_for(kind: NotificationKind, role: UserRole) -> String {
    let role = match role {
        UserRole::Tutor => "Tutor",
        UserRole::Student => "Student",
    };
    match kind {
        NotificationKind::Created => format!("New appointment scheduled - {role}"),
        NotificationKind::Updated => format!("Appointment updated - {role}"),
        NotificationKind::Cancelled => format!("Appointment cancelled - {role}"),
    }
}

/// Plain-text body summarising the appointment.
pub fn render_text(notification: &Notification) -> String {
    let appointment = &notification.appointment;
    let headline = match notification.kind {
        NotificationKind::Created => "A new tutoring appointment has been scheduled.",
        NotificationKind::Updated => "Your tutoring appointment has been updated.",
        NotificationKind::Cancelled => "Your tutoring appointment has been cancelled.",
    };

    let mut text = format!(
        "Hello {},\n\n{}\n\nDate: {}\nStatus: {}\nAppointment: {}\n",
        notification.recipient.name(),
        headline,
        appointment.appointment_date.format("%A %Y-%m-%d %H:%M (%:z)"),
        appointment.status,
        appointment.id,
    );
    if let Some(reason) = &appointment.reason {
        text.push_str(&format!("Reason: {reason}\n"));
    }
    if !appointment.checklist.is_empty() {
        text.push_str("\nChecklist:\n");
        for item in appointment.checklist.items() {
            let mark = if item.completed { "x" } else { " " };
            text.push_str(&format!("  [{mark}] {}\n", item.description));
        }
    }
    text
}
