/// The canonical alarm/notification event categories.
///
/// Ordinals are fixed by the protocol: a version 2+ device reports the event
/// category as a raw byte, and the supported-types bitmap is indexed by the
/// same ordinal. Raw bytes outside `0..14` carry no meaning here and must go
/// through [`from_u8`](Self::from_u8) so they are never used to index the
/// name table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventType {
    General = 0,
    Smoke = 1,
    CarbonMonoxide = 2,
    CarbonDioxide = 3,
    Heat = 4,
    Flood = 5,
    AccessControl = 6,
    Burglar = 7,
    PowerManagement = 8,
    System = 9,
    Emergency = 10,
    Clock = 11,
    Appliance = 12,
    HomeHealth = 13,
}

impl EventType {
    /// Number of defined event categories.
    pub const COUNT: usize = 14;

    /// All categories in ascending ordinal order.
    pub const ALL: [EventType; Self::COUNT] = [
        Self::General,
        Self::Smoke,
        Self::CarbonMonoxide,
        Self::CarbonDioxide,
        Self::Heat,
        Self::Flood,
        Self::AccessControl,
        Self::Burglar,
        Self::PowerManagement,
        Self::System,
        Self::Emergency,
        Self::Clock,
        Self::Appliance,
        Self::HomeHealth,
    ];

    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Creates an `EventType` from its protocol ordinal.
    ///
    /// Returns `None` for ordinals a device may legally send but this table
    /// does not know (>= 14).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::General),
            1 => Some(Self::Smoke),
            2 => Some(Self::CarbonMonoxide),
            3 => Some(Self::CarbonDioxide),
            4 => Some(Self::Heat),
            5 => Some(Self::Flood),
            6 => Some(Self::AccessControl),
            7 => Some(Self::Burglar),
            8 => Some(Self::PowerManagement),
            9 => Some(Self::System),
            10 => Some(Self::Emergency),
            11 => Some(Self::Clock),
            12 => Some(Self::Appliance),
            13 => Some(Self::HomeHealth),
            _ => None,
        }
    }

    /// Display name used for value registration and logging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Smoke => "Smoke",
            Self::CarbonMonoxide => "Carbon Monoxide",
            Self::CarbonDioxide => "Carbon Dioxide",
            Self::Heat => "Heat",
            Self::Flood => "Flood",
            Self::AccessControl => "Access Control",
            Self::Burglar => "Burglar",
            Self::PowerManagement => "Power Management",
            Self::System => "System",
            Self::Emergency => "Emergency",
            Self::Clock => "Clock",
            Self::Appliance => "Appliance",
            Self::HomeHealth => "HomeHealth",
        }
    }
}
