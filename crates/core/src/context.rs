//! The acting session context.
//!
//! Every record-store and workflow operation receives an explicit
//! [`ActingContext`] built once from the authenticated session, instead
//! of reading employee/warehouse/company from ambient state.

use crate::error::CoreError;
use crate::types::DbId;

/// Preferences bound to the acting session. Any of the three may be
/// missing; mutating operations require all of them (see [`bind`]).
///
/// [`bind`]: ActingContext::bind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingContext {
    pub company: Option<DbId>,
    pub employee: Option<DbId>,
    pub warehouse: Option<DbId>,
}

/// An [`ActingContext`] with all three preferences present. Relocations
/// take their owning employee/warehouse/company from this value, never
/// from client input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundContext {
    pub company: DbId,
    pub employee: DbId,
    pub warehouse: DbId,
}

impl ActingContext {
    /// Require company, employee, and warehouse to all be set.
    ///
    /// Returns `None` when any preference is missing; callers turn that
    /// into the "preferences incomplete" advisory before running any
    /// other validation.
    pub fn bind(&self) -> Option<BoundContext> {
        Some(BoundContext {
            company: self.company?,
            employee: self.employee?,
            warehouse: self.warehouse?,
        })
    }
}

/// Whether batch confirm/delete restrict the candidate set to records
/// owned by the acting employee.
///
/// Some deployments want shared draft queues, others strict ownership,
/// so this is configuration rather than a hard-coded rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmployeeScope {
    /// Only the acting employee's own drafts are eligible.
    #[default]
    ActingEmployee,
    /// Any draft is eligible regardless of owner.
    Unscoped,
}

impl EmployeeScope {
    /// Parse a configuration string (`"acting-employee"` / `"unscoped"`).
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "acting-employee" => Ok(Self::ActingEmployee),
            "unscoped" => Ok(Self::Unscoped),
            other => Err(CoreError::Validation(format!(
                "Invalid employee scope '{other}'. Expected 'acting-employee' or 'unscoped'"
            ))),
        }
    }

    /// The employee id the filter applies, if any.
    pub fn filter_employee(&self, ctx: &ActingContext) -> Option<DbId> {
        match self {
            Self::ActingEmployee => ctx.employee,
            Self::Unscoped => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_ctx() -> ActingContext {
        ActingContext {
            company: Some(1),
            employee: Some(2),
            warehouse: Some(3),
        }
    }

    #[test]
    fn bind_with_all_preferences() {
        let bound = full_ctx().bind().unwrap();
        assert_eq!(bound.company, 1);
        assert_eq!(bound.employee, 2);
        assert_eq!(bound.warehouse, 3);
    }

    #[test]
    fn bind_fails_when_employee_missing() {
        let ctx = ActingContext {
            employee: None,
            ..full_ctx()
        };
        assert!(ctx.bind().is_none());
    }

    #[test]
    fn bind_fails_when_warehouse_missing() {
        let ctx = ActingContext {
            warehouse: None,
            ..full_ctx()
        };
        assert!(ctx.bind().is_none());
    }

    #[test]
    fn scope_parse_valid() {
        assert_eq!(
            EmployeeScope::from_str("acting-employee").unwrap(),
            EmployeeScope::ActingEmployee
        );
        assert_eq!(
            EmployeeScope::from_str("unscoped").unwrap(),
            EmployeeScope::Unscoped
        );
    }

    #[test]
    fn scope_parse_invalid() {
        assert!(EmployeeScope::from_str("everyone").is_err());
    }

    #[test]
    fn acting_employee_scope_filters() {
        assert_eq!(
            EmployeeScope::ActingEmployee.filter_employee(&full_ctx()),
            Some(2)
        );
    }

    #[test]
    fn unscoped_never_filters() {
        assert_eq!(EmployeeScope::Unscoped.filter_employee(&full_ctx()), None);
    }

    #[test]
    fn acting_employee_scope_without_employee_is_open() {
        // No employee bound means nothing to scope by; the batch paths
        // then operate on all drafts.
        let ctx = ActingContext {
            employee: None,
            ..full_ctx()
        };
        assert_eq!(EmployeeScope::ActingEmployee.filter_employee(&ctx), None);
    }
}
