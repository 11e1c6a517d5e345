// Closed value sets for every status-like column

use crate::string_enum;

string_enum! {
    /// Lifecycle of an event; `completed` drives the completed-events view.
    pub enum EventStatus {
        Active => "active",
        Disabled => "disabled",
        Deleted => "deleted",
        Blocked => "blocked",
        Completed => "completed",
    }
}

string_enum! {
    pub enum CategoryStatus {
        Active => "active",
        Disabled => "disabled",
        Deleted => "deleted",
        Blocked => "blocked",
    }
}

string_enum! {
    /// Participation outcome of a member
    pub enum AttendStatus {
        Waiting => "waiting",
        Attending => "attending",
        Absent => "absent",
        Completed => "completed",
    }
}

string_enum! {
    /// Row status of an event membership
    pub enum RecordStatus {
        Active => "active",
        Disabled => "disabled",
        Deleted => "deleted",
        Blocked => "blocked",
    }
}

string_enum! {
    pub enum WishStatus {
        Active => "active",
        Disabled => "disabled",
        Deleted => "deleted",
    }
}

string_enum! {
    pub enum CoinStatus {
        Active => "active",
        Disabled => "disabled",
        Deleted => "deleted",
        Blocked => "blocked",
    }
}

string_enum! {
    /// Why coins moved. `gain_coin` is stored unsigned.
    pub enum GainType {
        Attendance => "attendance",
        Completion => "completion",
        Bonus => "bonus",
        Redemption => "redemption",
        Penalty => "penalty",
    }
}

impl Default for EventStatus {
    fn default() -> Self {
        EventStatus::Active
    }
}

impl Default for CategoryStatus {
    fn default() -> Self {
        CategoryStatus::Active
    }
}

impl Default for RecordStatus {
    fn default() -> Self {
        RecordStatus::Active
    }
}

impl Default for WishStatus {
    fn default() -> Self {
        WishStatus::Active
    }
}

impl Default for CoinStatus {
    fn default() -> Self {
        CoinStatus::Active
    }
}
