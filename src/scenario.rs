use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attribute::{normalize_name, Attribute};
use crate::estimator::EstimateError;

/// 시나리오별 가중치 묶음. 작업물/작업자 가중치는 시나리오에 따라 없을 수 있다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub initial_cost: f64,
    pub area_occupied: f64,
    pub power_rating: f64,
    pub time_spent: f64,
    pub workpieces: Option<f64>,
    pub operators: Option<f64>,
    pub ventilation_cost: f64,
    pub cleaning_cost: f64,
    pub waste_management_cost: f64,
    pub toilet_usage_cost: f64,
}

impl Coefficients {
    /// 항목 가중치. 시나리오에서 제외된 항목이면 `None`.
    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::InitialCost => Some(self.initial_cost),
            Attribute::AreaOccupied => Some(self.area_occupied),
            Attribute::PowerRating => Some(self.power_rating),
            Attribute::TimeSpent => Some(self.time_spent),
            Attribute::Workpieces => self.workpieces,
            Attribute::Operators => self.operators,
            Attribute::VentilationCost => Some(self.ventilation_cost),
            Attribute::CleaningCost => Some(self.cleaning_cost),
            Attribute::WasteManagementCost => Some(self.waste_management_cost),
            Attribute::ToiletUsageCost => Some(self.toilet_usage_cost),
        }
    }

    /// 포함된 항목과 가중치를 표시 순서대로 돌려준다.
    pub fn terms(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        Attribute::ALL
            .into_iter()
            .filter_map(move |a| self.get(a).map(|c| (a, c)))
    }
}

static ALL_VARIABLES: Coefficients = Coefficients {
    initial_cost: 0.00001,
    area_occupied: 0.05,
    power_rating: 0.003,
    time_spent: 150.0,
    workpieces: Some(5.0),
    operators: Some(50.0),
    ventilation_cost: 0.1,
    cleaning_cost: 0.08,
    waste_management_cost: 0.07,
    toilet_usage_cost: 0.02,
};

static EXCLUDING_WORKPIECES: Coefficients = Coefficients {
    initial_cost: 0.000012,
    area_occupied: 0.055,
    power_rating: 0.004,
    time_spent: 120.0,
    workpieces: None,
    operators: Some(55.0),
    ventilation_cost: 0.1,
    cleaning_cost: 0.09,
    waste_management_cost: 0.08,
    toilet_usage_cost: 0.03,
};

static EXCLUDING_OPERATORS: Coefficients = Coefficients {
    initial_cost: 0.000011,
    area_occupied: 0.06,
    power_rating: 0.0035,
    time_spent: 110.0,
    workpieces: Some(6.0),
    operators: None,
    ventilation_cost: 0.12,
    cleaning_cost: 0.1,
    waste_management_cost: 0.09,
    toilet_usage_cost: 0.03,
};

static EXCLUDING_WORKPIECES_AND_OPERATORS: Coefficients = Coefficients {
    initial_cost: 0.000013,
    area_occupied: 0.065,
    power_rating: 0.0045,
    time_spent: 130.0,
    workpieces: None,
    operators: None,
    ventilation_cost: 0.15,
    cleaning_cost: 0.12,
    waste_management_cost: 0.1,
    toilet_usage_cost: 0.035,
};

/// 어떤 변수를 고려할지 정하는 산정 시나리오.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    AllVariables,
    ExcludingWorkpieces,
    ExcludingOperators,
    ExcludingWorkpiecesAndOperators,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::AllVariables,
        Scenario::ExcludingWorkpieces,
        Scenario::ExcludingOperators,
        Scenario::ExcludingWorkpiecesAndOperators,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scenario::AllVariables => "All Variables",
            Scenario::ExcludingWorkpieces => "Excluding Workpieces",
            Scenario::ExcludingOperators => "Excluding Operators",
            Scenario::ExcludingWorkpiecesAndOperators => "Excluding Workpieces and Operators",
        }
    }

    pub fn coefficients(self) -> &'static Coefficients {
        match self {
            Scenario::AllVariables => &ALL_VARIABLES,
            Scenario::ExcludingWorkpieces => &EXCLUDING_WORKPIECES,
            Scenario::ExcludingOperators => &EXCLUDING_OPERATORS,
            Scenario::ExcludingWorkpiecesAndOperators => &EXCLUDING_WORKPIECES_AND_OPERATORS,
        }
    }

    pub fn coefficient(self, attribute: Attribute) -> Option<f64> {
        self.coefficients().get(attribute)
    }

    /// 해당 항목이 가격 식에 포함되는지 여부.
    pub fn includes(self, attribute: Attribute) -> bool {
        self.coefficient(attribute).is_some()
    }

    /// 표시 이름("Excluding Operators")이나 변형 이름("ExcludingOperators"),
    /// 케밥 표기("excluding-operators")를 모두 받는다.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize_name(name);
        Scenario::ALL
            .into_iter()
            .find(|s| normalize_name(s.name()) == wanted)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::from_name(s).ok_or_else(|| EstimateError::UnknownScenario(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditional_terms_follow_scenario() {
        assert!(Scenario::AllVariables.includes(Attribute::Workpieces));
        assert!(Scenario::AllVariables.includes(Attribute::Operators));
        assert!(!Scenario::ExcludingWorkpieces.includes(Attribute::Workpieces));
        assert!(Scenario::ExcludingWorkpieces.includes(Attribute::Operators));
        assert!(Scenario::ExcludingOperators.includes(Attribute::Workpieces));
        assert!(!Scenario::ExcludingOperators.includes(Attribute::Operators));
        assert!(!Scenario::ExcludingWorkpiecesAndOperators.includes(Attribute::Workpieces));
        assert!(!Scenario::ExcludingWorkpiecesAndOperators.includes(Attribute::Operators));
    }

    #[test]
    fn every_scenario_keeps_the_eight_fixed_terms() {
        for scenario in Scenario::ALL {
            let fixed = scenario
                .coefficients()
                .terms()
                .filter(|(a, _)| !matches!(a, Attribute::Workpieces | Attribute::Operators))
                .count();
            assert_eq!(fixed, 8, "{scenario}");
        }
    }

    #[test]
    fn coefficients_are_non_negative() {
        for scenario in Scenario::ALL {
            for (attribute, c) in scenario.coefficients().terms() {
                assert!(c >= 0.0, "{scenario} / {attribute}");
            }
        }
    }

    #[test]
    fn names_round_trip_through_parsing() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.name().parse::<Scenario>().unwrap(), scenario);
        }
        assert_eq!(
            "ExcludingWorkpiecesAndOperators".parse::<Scenario>().unwrap(),
            Scenario::ExcludingWorkpiecesAndOperators
        );
        assert_eq!(
            "excluding-operators".parse::<Scenario>().unwrap(),
            Scenario::ExcludingOperators
        );
    }

    #[test]
    fn unknown_scenario_name() {
        let err = "Only Costs".parse::<Scenario>().unwrap_err();
        assert!(matches!(err, EstimateError::UnknownScenario(ref n) if n == "Only Costs"));
    }
}
