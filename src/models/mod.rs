pub mod document;
pub mod invitation;

pub use document::{
    DocumentCreatedEvent, DocumentPath, DocumentSnapshot, FieldValue, TriggerPayload,
    INVITATIONS_COLLECTION,
};
pub use invitation::{EmailMessage, InvitationRecord};
