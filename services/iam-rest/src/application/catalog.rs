//! 操作目录
//!
//! 服务契约暴露的全部操作，每个操作归属一个管理器分组

pub const SUPER_USER: &str = "fortress-rest-super-user";
pub const ADMIN_MGR_USER: &str = "fortress-rest-admin-user";
pub const REVIEW_MGR_USER: &str = "fortress-rest-review-user";
pub const ACCESS_MGR_USER: &str = "fortress-rest-access-user";
pub const DELEGATED_ADMIN_MGR_USER: &str = "fortress-rest-deladmin-user";
pub const DELEGATED_REVIEW_MGR_USER: &str = "fortress-rest-delreview-user";
pub const DELEGATED_ACCESS_MGR_USER: &str = "fortress-rest-delaccess-user";
pub const PASSWORD_MGR_USER: &str = "fortress-rest-pwmgr-user";
pub const AUDIT_MGR_USER: &str = "fortress-rest-audit-user";
pub const CONFIG_MGR_USER: &str = "fortress-rest-config-user";

/// 未匹配任何操作时的兜底操作
pub const INVALID: &str = "invalid";

/// 管理器分组
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Manager {
    Admin,
    Review,
    Access,
    DelegatedAdmin,
    DelegatedReview,
    DelegatedAccess,
    PasswordPolicy,
    Audit,
    Config,
    /// 兜底操作，所有服务角色均可调用
    Any,
}

impl Manager {
    const ALL_ROLES: [&'static str; 10] = [
        SUPER_USER,
        ACCESS_MGR_USER,
        ADMIN_MGR_USER,
        REVIEW_MGR_USER,
        DELEGATED_ACCESS_MGR_USER,
        DELEGATED_ADMIN_MGR_USER,
        DELEGATED_REVIEW_MGR_USER,
        PASSWORD_MGR_USER,
        AUDIT_MGR_USER,
        CONFIG_MGR_USER,
    ];

    /// 分组所需角色（超级用户 + 分组角色）
    pub fn roles(self) -> &'static [&'static str] {
        match self {
            Self::Admin => &[SUPER_USER, ADMIN_MGR_USER],
            Self::Review => &[SUPER_USER, REVIEW_MGR_USER],
            Self::Access => &[SUPER_USER, ACCESS_MGR_USER],
            Self::DelegatedAdmin => &[SUPER_USER, DELEGATED_ADMIN_MGR_USER],
            Self::DelegatedReview => &[SUPER_USER, DELEGATED_REVIEW_MGR_USER],
            Self::DelegatedAccess => &[SUPER_USER, DELEGATED_ACCESS_MGR_USER],
            Self::PasswordPolicy => &[SUPER_USER, PASSWORD_MGR_USER],
            Self::Audit => &[SUPER_USER, AUDIT_MGR_USER],
            Self::Config => &[SUPER_USER, CONFIG_MGR_USER],
            Self::Any => &Self::ALL_ROLES,
        }
    }

    /// 访问类操作使用调用方自带的会话，兜底操作不访问引擎，二者都不做会话绑定
    pub fn binds_session(self) -> bool {
        !matches!(self, Self::Access | Self::DelegatedAccess | Self::Any)
    }
}

/// 目录中的一个操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub manager: Manager,
}

impl Operation {
    pub fn binds_session(&self) -> bool {
        self.manager.binds_session()
    }
}

macro_rules! catalog {
    ($($manager:ident => [$($name:expr),* $(,)?]),* $(,)?) => {
        /// 全部操作，按分组声明顺序排列
        pub const OPERATIONS: &[Operation] = &[
            $($(Operation { name: $name, manager: Manager::$manager },)*)*
        ];
    };
}

catalog! {
    Admin => [
        "addUser", "deleteUser", "disableUser", "updateUser", "changePassword",
        "lockUserAccount", "unlockUserAccount", "resetPassword",
        "addRole", "deleteRole", "updateRole", "assignUser", "deassignUser",
        "addPermission", "updatePermission", "deletePermission",
        "addPermObj", "updatePermObj", "deletePermObj",
        "grant", "revoke", "grantUser", "revokeUser",
        "addDescendant", "addAscendant", "addInheritance", "deleteInheritance",
        "createSsdSet", "updateSsdSet", "addSsdRoleMember", "deleteSsdRoleMember",
        "deleteSsdSet", "setSsdSetCardinality",
        "createDsdSet", "updateDsdSet", "addDsdRoleMember", "deleteDsdRoleMember",
        "deleteDsdSet", "setDsdSetCardinality",
        "addRoleConstraint", "removeRoleConstraint", "removeRoleConstraintWid",
        "addPermissionAttributeSet", "deletePermissionAttributeSet",
        "addPermissionAttributeToSet", "removePermissionAttributeFromSet",
        "updatePermissionAttributeInSet", "enableRoleConstraint", "disableRoleConstraint",
        "readGroup", "addGroup", "deleteGroup", "updateGroup",
    ],
    Review => [
        "readPermission", "readPermObj", "findPermissions", "findPermsByObj",
        "findAnyPermissions", "findPermObjs", "readRole", "findRoles",
        "readUser", "findUsers", "assignedUsers", "assignedUsersConstraints",
        "assignedUsersConstraintsKey", "assignedRoles", "authorizedUsers", "authorizedRoles",
        "permissionRoles", "findRoleConstraints", "rolePermissions", "userPermissions",
        "authorizedPermissionRoles", "permissionUsers", "authorizedPermissionUsers",
        "readPermAttributeSet", "rolePermissionAttributeSets",
        "ssdRoleSets", "ssdRoleSet", "ssdRoleSetRoles", "ssdRoleSetCardinality", "ssdSets",
        "dsdRoleSets", "dsdRoleSet", "dsdRoleSetRoles", "dsdRoleSetCardinality", "dsdSets",
        "assignedGroupRoles", "assignedGroups", "assignGroup", "deassignGroup",
    ],
    Access => [
        "authenticate", "createSession", "createSessionTrusted", "createGroupSession",
        "checkAccess", "createSessionCheckAccess", "isUserInRole",
        "sessionPermissions", "sessionRoles", "authorizedSessionRoles",
        "addActiveRole", "dropActiveRole", "getUserId", "getUser",
    ],
    DelegatedAdmin => [
        "addAdminRole", "deleteAdminRole", "updateAdminRole",
        "assignAdminUser", "deassignAdminUser",
        "addAdminDescendant", "addAdminAscendant", "addAdminInheritance", "deleteAdminInheritance",
        "addOrg", "updateOrg", "deleteOrg",
        "addOrgDescendant", "addOrgAscendant", "addOrgInheritance", "deleteOrgInheritance",
    ],
    DelegatedReview => [
        "readAdminRole", "findAdminRoles", "assignedAdminRoles", "assignedAdminUsers",
        "readOrg", "searchOrg",
    ],
    DelegatedAccess => [
        "canAssign", "canDeassign", "canGrant", "canRevoke", "checkAdminAccess",
        "addActiveAdminRole", "dropActiveAdminRole",
        "sessionAdminRoles", "sessionAdminPermissions", "authorizedSessionAdminRoles",
    ],
    PasswordPolicy => [
        "addPolicy", "updatePolicy", "deletePolicy", "readPolicy", "searchPolicy",
        "updateUserPolicy", "deleteUserPolicy",
    ],
    Audit => [
        "searchBinds", "getUserAuthZs", "searchAuthZs", "searchUserSessions",
        "searchAdminMods", "searchInvalidUsers",
    ],
    Config => [
        "addConfig", "updateConfig", "deleteConfig", "readConfig",
    ],
    Any => [INVALID],
}

const FALLBACK: Operation = Operation {
    name: INVALID,
    manager: Manager::Any,
};

/// 按名称查找操作
pub fn lookup(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}

/// 按请求路径分派操作，未知名称落到兜底操作
pub fn dispatch(name: &str) -> &'static Operation {
    lookup(name).unwrap_or(&FALLBACK)
}
