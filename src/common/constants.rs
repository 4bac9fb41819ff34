/// Source tag constants to ensure consistency across the codebase
/// These are the tags attached to every catalog record and used for route selection

pub const PACKAGE_SOURCE: &str = "package";
pub const HOLIDAY_SOURCE: &str = "holiday";
pub const DESTINATION_SOURCE: &str = "destination";
pub const FIXED_DEPARTURE_SOURCE: &str = "fixed-departure";
pub const ADVENTURE_SOURCE: &str = "adventure";

// Default endpoint paths, relative to the configured API base URL
pub const PACKAGES_PATH: &str = "/api/packages";
pub const HOLIDAY_TYPES_PATH: &str = "/api/holiday-types";
pub const DESTINATIONS_PATH: &str = "/api/destinations";
pub const FIXED_DEPARTURES_PATH: &str = "/api/fixed-departures";
pub const ADVENTURE_PACKAGES_PATH: &str = "/api/adventure-packages";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Keys that may wrap the record array in an endpoint payload, in priority order
pub const PAYLOAD_ARRAY_KEYS: [&str; 6] = [
    "data",
    "packages",
    "destinations",
    "fixedDepartures",
    "holidayTypes",
    "adventurePackages",
];

// Display fallbacks for reconciled items
pub const DEFAULT_TITLE: &str = "Untitled Trip";
pub const DEFAULT_DESTINATION: &str = "India";
pub const DEFAULT_DURATION: &str = "Flexible";

/// Field carrying the source tag when a record is rendered back to JSON
pub const SOURCE_TAG_FIELD: &str = "sourceTag";
