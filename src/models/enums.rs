use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(UserRole {
    Doctor => "doctor",
    Patient => "patient",
});

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

str_enum!(BloodGroup {
    OPos => "o_pos",
    APos => "a_pos",
    BPos => "b_pos",
    AbPos => "ab_pos",
    ONeg => "o_neg",
    ANeg => "a_neg",
    BNeg => "b_neg",
    AbNeg => "ab_neg",
});

str_enum!(HealthRecordType {
    Visit => "visit",
    Lab => "lab",
    Prescription => "prescription",
    Note => "note",
});

str_enum!(DayPeriod {
    Morning => "morning",
    Evening => "evening",
    Night => "night",
});

str_enum!(ReminderType {
    Medicine => "medicine",
    Appointment => "appointment",
});

str_enum!(AppointmentStatus {
    Scheduled => "scheduled",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl BloodGroup {
    /// Fixed ABO/Rh ordering used for index-based selection.
    pub const ORDER: [BloodGroup; 8] = [
        BloodGroup::OPos,
        BloodGroup::APos,
        BloodGroup::BPos,
        BloodGroup::AbPos,
        BloodGroup::ONeg,
        BloodGroup::ANeg,
        BloodGroup::BNeg,
        BloodGroup::AbNeg,
    ];

    pub fn for_index(index: usize) -> Self {
        Self::ORDER[index % Self::ORDER.len()]
    }
}

impl HealthRecordType {
    pub const ORDER: [HealthRecordType; 4] = [
        HealthRecordType::Visit,
        HealthRecordType::Lab,
        HealthRecordType::Prescription,
        HealthRecordType::Note,
    ];

    pub fn for_index(index: usize) -> Self {
        Self::ORDER[index % Self::ORDER.len()]
    }
}

impl DayPeriod {
    pub const ORDER: [DayPeriod; 3] = [DayPeriod::Morning, DayPeriod::Evening, DayPeriod::Night];

    pub fn for_index(index: usize) -> Self {
        Self::ORDER[index % Self::ORDER.len()]
    }

    /// Hour of day (UTC) at which a dose in this period is due.
    pub fn due_hour(&self) -> u32 {
        match self {
            Self::Morning => 8,
            Self::Evening => 18,
            Self::Night => 21,
        }
    }
}
