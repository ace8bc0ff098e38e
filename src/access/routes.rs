use std::fmt;

use thiserror::Error;

use crate::access::guard::{Identity, Role};

/// Logical resource areas of the platform. Each area groups operations that
/// share one role-permission set; the same table gates navigation and API
/// calls so the two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteArea {
    UserAdmin,
    CourseAuthoring,
    CourseCatalog,
    Enrollment,
    ExamManagement,
    Grading,
    Profile,
}

impl RouteArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteArea::UserAdmin => "user-admin",
            RouteArea::CourseAuthoring => "course-authoring",
            RouteArea::CourseCatalog => "course-catalog",
            RouteArea::Enrollment => "enrollment",
            RouteArea::ExamManagement => "exam-management",
            RouteArea::Grading => "grading",
            RouteArea::Profile => "profile",
        }
    }
}

impl fmt::Display for RouteArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthzError {
    #[error("role is not permitted to access {0}")]
    Forbidden(RouteArea),
}

fn permitted_roles(area: RouteArea) -> &'static [Role] {
    match area {
        RouteArea::UserAdmin => &[Role::Admin],
        RouteArea::CourseAuthoring => &[Role::Instructor],
        RouteArea::CourseCatalog => &[Role::Student],
        RouteArea::Enrollment => &[Role::Student],
        RouteArea::ExamManagement => &[Role::Instructor],
        RouteArea::Grading => &[Role::Instructor],
        RouteArea::Profile => &[Role::Admin, Role::Instructor, Role::Student],
    }
}

/// Deny-by-default check of an identity's role against an area. Evaluated on
/// every call; never cached per session.
pub fn authorize(identity: &Identity, area: RouteArea) -> Result<(), AuthzError> {
    if permitted_roles(area).contains(&identity.role) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(area))
    }
}
