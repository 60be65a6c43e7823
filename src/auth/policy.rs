//! Single decision point for who may do what to which resource.
//!
//! `decide` is a pure function of the caller, a resource descriptor and an action.
//! Handlers and services describe the request declaratively and never re-derive
//! role checks themselves. Public reads (exam list, course list, starting an exam)
//! do not go through the policy at all.

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Course, Exam, User, UserRole},
};

/// An authenticated caller, resolved against the credential store so the role is
/// the one currently stored rather than the one at login time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: String,
    pub username: String,
    pub role: UserRole,
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Caller {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Exam,
    Course,
    User,
    /// Platform-wide data such as dashboard statistics.
    Platform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
    AppendSubresource,
    /// Read fields hidden from the public view (answer keys, course materials, user lists).
    ViewPrivileged,
}

impl Action {
    fn is_owner_mutation(self) -> bool {
        matches!(
            self,
            Action::Update | Action::Delete | Action::AppendSubresource
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

#[derive(Debug, Clone, Copy)]
pub struct Resource<'a> {
    pub kind: ResourceKind,
    pub owner_id: Option<&'a str>,
    pub members: &'a [String],
}

impl<'a> Resource<'a> {
    pub fn of_kind(kind: ResourceKind) -> Self {
        Resource {
            kind,
            owner_id: None,
            members: &[],
        }
    }

    pub fn exam(exam: &'a Exam) -> Self {
        Resource {
            kind: ResourceKind::Exam,
            owner_id: Some(exam.created_by_user_id.as_str()),
            members: &[],
        }
    }

    pub fn course(course: &'a Course, enrolled: &'a [String]) -> Self {
        Resource {
            kind: ResourceKind::Course,
            owner_id: course.instructor_id.as_deref(),
            members: enrolled,
        }
    }
}

pub fn decide(caller: Option<&Caller>, resource: &Resource<'_>, action: Action) -> Decision {
    let Some(caller) = caller else {
        return Decision::Deny;
    };

    if caller.role == UserRole::Admin {
        return Decision::Allow;
    }

    let is_owner = resource.owner_id == Some(caller.id.as_str());

    if is_owner && action.is_owner_mutation() {
        return Decision::Allow;
    }

    if caller.role == UserRole::Teacher
        && action == Action::Create
        && matches!(resource.kind, ResourceKind::Exam | ResourceKind::Course)
    {
        return Decision::Allow;
    }

    if action == Action::ViewPrivileged
        && (is_owner || resource.members.iter().any(|m| m == &caller.id))
    {
        return Decision::Allow;
    }

    Decision::Deny
}

/// `decide`, mapped onto the error taxonomy: anonymous callers get `Unauthorized`,
/// authenticated ones get `Forbidden`.
pub fn authorize(caller: Option<&Caller>, resource: &Resource<'_>, action: Action) -> AppResult<()> {
    match decide(caller, resource, action) {
        Decision::Allow => Ok(()),
        Decision::Deny => match caller {
            None => Err(AppError::Unauthorized(
                "Authentication required".to_string(),
            )),
            Some(caller) => {
                log::warn!(
                    "Denied {:?} on {:?} for user '{}' ({})",
                    action,
                    resource.kind,
                    caller.username,
                    caller.role
                );
                Err(AppError::Forbidden(
                    "You do not have permission to perform this action".to_string(),
                ))
            }
        },
    }
}
