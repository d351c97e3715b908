use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attribute::{normalize_name, Attribute, InputRecord};
use crate::estimator::EstimateError;
use crate::scenario::Scenario;

/// 입력 허용 범위 [min, max].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeRange {
    pub min: f64,
    pub max: f64,
}

impl AttributeRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl fmt::Display for AttributeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// 기종별 항목 범위 표.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineRanges {
    pub initial_cost: AttributeRange,
    pub area_occupied: AttributeRange,
    pub power_rating: AttributeRange,
    pub time_spent: AttributeRange,
    pub workpieces: AttributeRange,
    pub operators: AttributeRange,
    pub ventilation_cost: AttributeRange,
    pub cleaning_cost: AttributeRange,
    pub waste_management_cost: AttributeRange,
    pub toilet_usage_cost: AttributeRange,
}

impl MachineRanges {
    pub fn get(&self, attribute: Attribute) -> AttributeRange {
        match attribute {
            Attribute::InitialCost => self.initial_cost,
            Attribute::AreaOccupied => self.area_occupied,
            Attribute::PowerRating => self.power_rating,
            Attribute::TimeSpent => self.time_spent,
            Attribute::Workpieces => self.workpieces,
            Attribute::Operators => self.operators,
            Attribute::VentilationCost => self.ventilation_cost,
            Attribute::CleaningCost => self.cleaning_cost,
            Attribute::WasteManagementCost => self.waste_management_cost,
            Attribute::ToiletUsageCost => self.toilet_usage_cost,
        }
    }
}

const fn r(min: f64, max: f64) -> AttributeRange {
    AttributeRange::new(min, max)
}

static LATHE: MachineRanges = MachineRanges {
    initial_cost: r(1_500_000.0, 3_800_000.0),
    area_occupied: r(50.0, 500.0),
    power_rating: r(15_000.0, 22_000.0),
    time_spent: r(60.0, 720.0),
    workpieces: r(5.0, 30.0),
    operators: r(2.0, 10.0),
    ventilation_cost: r(5_000.0, 15_000.0),
    cleaning_cost: r(3_500.0, 10_000.0),
    waste_management_cost: r(3_500.0, 10_000.0),
    toilet_usage_cost: r(3_500.0, 10_000.0),
};

static MILLING: MachineRanges = MachineRanges {
    initial_cost: r(5_000_000.0, 40_000_000.0),
    area_occupied: r(50.0, 500.0),
    power_rating: r(20_000.0, 40_000.0),
    time_spent: r(60.0, 720.0),
    workpieces: r(10.0, 50.0),
    operators: r(1.0, 5.0),
    ventilation_cost: r(7_000.0, 10_000.0),
    cleaning_cost: r(4_000.0, 15_000.0),
    waste_management_cost: r(4_000.0, 15_000.0),
    toilet_usage_cost: r(3_500.0, 10_000.0),
};

static DRILLING: MachineRanges = MachineRanges {
    initial_cost: r(1_500_000.0, 4_000_000.0),
    area_occupied: r(50.0, 500.0),
    power_rating: r(10_000.0, 25_000.0),
    time_spent: r(60.0, 720.0),
    workpieces: r(5.0, 30.0),
    operators: r(2.0, 5.0),
    ventilation_cost: r(5_000.0, 15_000.0),
    cleaning_cost: r(3_500.0, 10_000.0),
    waste_management_cost: r(3_500.0, 10_000.0),
    toilet_usage_cost: r(3_500.0, 10_000.0),
};

static GROUNDING: MachineRanges = MachineRanges {
    initial_cost: r(1_500_000.0, 5_000_000.0),
    area_occupied: r(50.0, 500.0),
    power_rating: r(5_000.0, 20_000.0),
    time_spent: r(60.0, 720.0),
    workpieces: r(5.0, 30.0),
    operators: r(2.0, 5.0),
    ventilation_cost: r(5_000.0, 15_000.0),
    cleaning_cost: r(3_500.0, 10_000.0),
    waste_management_cost: r(3_500.0, 10_000.0),
    toilet_usage_cost: r(3_500.0, 10_000.0),
};

/// 공작기계 기종. 가격 식에는 영향이 없고 입력 범위만 결정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineType {
    Lathe,
    Milling,
    Drilling,
    Grounding,
}

impl MachineType {
    pub const ALL: [MachineType; 4] = [
        MachineType::Lathe,
        MachineType::Milling,
        MachineType::Drilling,
        MachineType::Grounding,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MachineType::Lathe => "Lathe Machine",
            MachineType::Milling => "Milling Machine",
            MachineType::Drilling => "Drilling Machine",
            MachineType::Grounding => "Grounding Machine",
        }
    }

    fn short_name(self) -> &'static str {
        match self {
            MachineType::Lathe => "lathe",
            MachineType::Milling => "milling",
            MachineType::Drilling => "drilling",
            MachineType::Grounding => "grounding",
        }
    }

    pub fn ranges(self) -> &'static MachineRanges {
        match self {
            MachineType::Lathe => &LATHE,
            MachineType::Milling => &MILLING,
            MachineType::Drilling => &DRILLING,
            MachineType::Grounding => &GROUNDING,
        }
    }

    pub fn range(self, attribute: Attribute) -> AttributeRange {
        self.ranges().get(attribute)
    }

    /// 시나리오에 포함된 항목 중 범위를 벗어난 값을 모은다.
    /// 제외된 항목(폼에서 0으로 채우는 값)은 검사하지 않는다.
    pub fn out_of_range(self, scenario: Scenario, input: &InputRecord) -> Vec<RangeViolation> {
        input
            .iter()
            .filter(|(a, _)| scenario.includes(*a))
            .filter_map(|(attribute, value)| {
                let range = self.range(attribute);
                (!range.contains(value)).then_some(RangeViolation {
                    machine_type: self,
                    attribute,
                    value,
                    range,
                })
            })
            .collect()
    }

    /// "Lathe Machine", "lathe", "Lathe" 모두 허용한다.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize_name(name);
        MachineType::ALL
            .into_iter()
            .find(|m| normalize_name(m.name()) == wanted || m.short_name() == wanted)
    }
}

impl fmt::Display for MachineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MachineType {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MachineType::from_name(s)
            .ok_or_else(|| EstimateError::UnknownMachineType(s.trim().to_string()))
    }
}

/// 범위 위반 한 건.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeViolation {
    pub machine_type: MachineType,
    pub attribute: Attribute,
    pub value: f64,
    pub range: AttributeRange,
}

impl fmt::Display for RangeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is outside {} for {}",
            self.attribute, self.value, self.range, self.machine_type
        )
    }
}
