//! Application-wide constants

pub const MAX_GROUP_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_SYSTEM_NAME_LENGTH: usize = 100;

/// Groups shown per page in a system's group list.
pub const GROUP_LIST_PAGE_SIZE: usize = 25;

pub const HID_LENGTH: usize = 5;
pub const HID_MAX_ATTEMPTS: u32 = 10;

pub const DEFAULT_PREFIX: &str = "pk;";
pub const DEFAULT_TIME_ZONE: &str = "UTC";
