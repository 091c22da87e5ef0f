//! Static role/resource/action permission matrix.
//!
//! The matrix is a pure function over closed enums: every combination
//! resolves to a deliberate allow or deny, there is no hidden state and no
//! string matching. Handlers call [`has_permission`] before performing any
//! privileged work; denial means no side effects were executed.

use crate::enums::{ActionKind, Resource, Role};

/// Whether `role` may perform `action` on `resource`.
///
/// Total and deterministic. Unlisted combinations deny; a new resource must
/// be wired into each role arm on purpose rather than silently inheriting
/// access.
pub fn has_permission(role: Role, resource: Resource, action: ActionKind) -> bool {
    use ActionKind::*;
    use Resource::*;

    match role {
        Role::SuperAdmin => true,
        Role::Admin => match resource {
            Dashboard | Customers | Sales | Plans | Products | Leads | ReferralCodes
            | Whitepapers | Seminars | Settings => true,
            Blog => matches!(action, Read),
            Users | Audit => false,
        },
        Role::Sales => matches!(
            resource,
            Dashboard | Customers | Sales | Products | Leads | ReferralCodes
        ),
        Role::Marketing => match resource {
            Plans | Whitepapers => true,
            Leads => matches!(action, Read),
            _ => false,
        },
        Role::Media => matches!(resource, Blog | Whitepapers),
    }
}

/// Only super admins manage other admin accounts.
#[inline]
pub fn can_manage_role(manager: Role, _target: Role) -> bool {
    matches!(manager, Role::SuperAdmin)
}

/// Roles a given role may assign when creating users. Super admins may hand
/// out every role below their own; nobody else creates users at all.
pub fn assignable_roles(role: Role) -> Vec<Role> {
    match role {
        Role::SuperAdmin => vec![Role::Admin, Role::Sales, Role::Marketing, Role::Media],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn matrix_is_total_and_deterministic() {
        for role in Role::iter() {
            for resource in Resource::iter() {
                for action in ActionKind::iter() {
                    let first = has_permission(role, resource, action);
                    let second = has_permission(role, resource, action);
                    assert_eq!(first, second, "{role} {resource} {action}");
                }
            }
        }
    }

    #[test]
    fn super_admin_allows_everything() {
        for resource in Resource::iter() {
            for action in ActionKind::iter() {
                assert!(has_permission(Role::SuperAdmin, resource, action));
            }
        }
    }

    #[test]
    fn admin_blog_is_read_only() {
        assert!(has_permission(Role::Admin, Resource::Blog, ActionKind::Read));
        assert!(!has_permission(Role::Admin, Resource::Blog, ActionKind::Update));
        assert!(!has_permission(Role::Admin, Resource::Blog, ActionKind::Publish));
    }

    #[test]
    fn admin_cannot_touch_users() {
        for action in ActionKind::iter() {
            assert!(!has_permission(Role::Admin, Resource::Users, action));
        }
    }

    #[test]
    fn audit_trail_is_super_admin_only() {
        for role in Role::iter() {
            for action in ActionKind::iter() {
                assert_eq!(
                    has_permission(role, Resource::Audit, action),
                    role == Role::SuperAdmin,
                    "{role} {action}"
                );
            }
        }
    }

    #[test]
    fn sales_has_no_blog_or_seminar_access() {
        for action in ActionKind::iter() {
            assert!(!has_permission(Role::Sales, Resource::Blog, action));
            assert!(!has_permission(Role::Sales, Resource::Seminars, action));
        }
        assert!(has_permission(Role::Sales, Resource::Customers, ActionKind::Delete));
    }

    #[test]
    fn marketing_leads_are_read_only() {
        assert!(has_permission(Role::Marketing, Resource::Leads, ActionKind::Read));
        assert!(!has_permission(Role::Marketing, Resource::Leads, ActionKind::Update));
        assert!(has_permission(Role::Marketing, Resource::Plans, ActionKind::Create));
    }

    #[test]
    fn media_owns_blog() {
        for action in ActionKind::iter() {
            assert!(has_permission(Role::Media, Resource::Blog, action));
        }
        assert!(!has_permission(Role::Media, Resource::Seminars, ActionKind::Read));
    }

    #[test]
    fn only_super_admin_manages_roles() {
        for manager in Role::iter() {
            for target in Role::iter() {
                assert_eq!(
                    can_manage_role(manager, target),
                    manager == Role::SuperAdmin
                );
            }
        }
        assert!(assignable_roles(Role::Admin).is_empty());
        assert_eq!(assignable_roles(Role::SuperAdmin).len(), 4);
    }
}
