use serde::{Deserialize, Serialize};
use std::fmt;

/// The sender of a chat [`Message`].
///
/// Roles are a closed set: the conversation view only ever renders user
/// input, assistant answers, and system notices (cancellations, errors).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text typed by the person driving the editor.
    User,
    /// An answer produced by the remote executor.
    Assistant,
    /// Session-generated notices: cancellations, execution failures.
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Assistant => f.write_str("assistant"),
            Role::System => f.write_str("system"),
        }
    }
}

/// A message in an execution session's conversation, containing a role and
/// text content.
///
/// The message log is session-local and append-only: the run lifecycle pushes
/// user queries, executor answers, and system notices onto it, and the log is
/// discarded when the editor instance is dropped. Nothing here is persisted.
///
/// # Examples
///
/// ```
/// use stackweave::message::{Message, Role};
///
/// let user_msg = Message::user("What's in the report?");
/// let answer = Message::assistant("Revenue grew 12% year over year.");
/// let notice = Message::system("Request cancelled by user.");
///
/// assert!(user_msg.has_role(Role::User));
/// assert!(!answer.has_role(Role::System));
/// ```
///
/// # Serialization
///
/// Messages serialize with lowercase role names:
///
/// ```
/// use stackweave::message::Message;
///
/// let json = serde_json::to_string(&Message::user("hi")).unwrap();
/// assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced this message.
    pub role: Role,
    /// The text content of the message.
    pub content: String,
}

impl Message {
    /// Creates a new message with the specified role and content.
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message with the specified content.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message with the specified content.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a system message with the specified content.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Returns true if this message has the specified role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
