/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Super admin role - manages admin accounts in addition to everything staff can do
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Staff role - reviews, edits and approves submitted results
pub const ROLE_STAFF: &str = "staff";

// =============================================================================
// RANKING CONSTANTS
// =============================================================================

/// Number of entries in the standard toppers list
pub const TOP_THREE: usize = 3;
