/// Base URL of the campus navigation service; room codes are appended.
pub const NAV_ROOM_URL: &str = "https://nav.tum.de/room/";

/// Upstream property grouping the occurrences of one scheduled series.
pub const RECURRENCE_ID_PROPERTY: &str = "X-CO-RECURRINGID";

pub const ADDITIONAL_ROOMS_HEADER: &str = "Additional rooms:";

/// Course name shortenings shipped with the binary.
pub const EMBEDDED_COURSES: &str = include_str!("../data/courses.json");

/// Room-code prefix to building mapping shipped with the binary.
pub const EMBEDDED_BUILDINGS: &str = include_str!("../data/buildings.json");
