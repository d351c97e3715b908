use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::estimator::EstimateError;
use crate::machine::MachineType;
use crate::scenario::Scenario;

/// 가격 산정에 쓰이는 입력 항목. 선언 순서가 곧 화면/출력 순서다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    InitialCost,
    AreaOccupied,
    PowerRating,
    TimeSpent,
    Workpieces,
    Operators,
    VentilationCost,
    CleaningCost,
    WasteManagementCost,
    ToiletUsageCost,
}

impl Attribute {
    pub const ALL: [Attribute; 10] = [
        Attribute::InitialCost,
        Attribute::AreaOccupied,
        Attribute::PowerRating,
        Attribute::TimeSpent,
        Attribute::Workpieces,
        Attribute::Operators,
        Attribute::VentilationCost,
        Attribute::CleaningCost,
        Attribute::WasteManagementCost,
        Attribute::ToiletUsageCost,
    ];

    /// 표시 이름. 입력 파일/명령행의 키로도 사용된다.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::InitialCost => "Initial Cost",
            Attribute::AreaOccupied => "Area Occupied",
            Attribute::PowerRating => "Power Rating",
            Attribute::TimeSpent => "Time Spent",
            Attribute::Workpieces => "Workpieces",
            Attribute::Operators => "Operators",
            Attribute::VentilationCost => "Ventilation Cost",
            Attribute::CleaningCost => "Cleaning Cost",
            Attribute::WasteManagementCost => "Waste Management Cost",
            Attribute::ToiletUsageCost => "Toilet Usage Cost",
        }
    }

    /// 입력 단위 표기. 비용 항목은 통화 기호를 따로 붙이므로 `None`.
    pub fn unit(self) -> Option<&'static str> {
        match self {
            Attribute::AreaOccupied => Some("m²"),
            Attribute::PowerRating => Some("Watts"),
            Attribute::TimeSpent => Some("minutes"),
            Attribute::Workpieces => Some("units"),
            Attribute::Operators => Some("persons"),
            Attribute::InitialCost
            | Attribute::VentilationCost
            | Attribute::CleaningCost
            | Attribute::WasteManagementCost
            | Attribute::ToiletUsageCost => None,
        }
    }

    /// 정수 개수로만 의미가 있는 항목(작업물, 작업자).
    pub fn is_count(self) -> bool {
        matches!(self, Attribute::Workpieces | Attribute::Operators)
    }

    /// "Initial Cost (₦)" 형태의 입력 라벨을 만든다.
    pub fn label(self, currency_symbol: &str) -> String {
        match self.unit() {
            Some(unit) => format!("{} ({unit})", self.name()),
            None => format!("{} ({currency_symbol})", self.name()),
        }
    }

    /// 대소문자, 공백, `-`, `_` 차이를 무시하고 이름을 해석한다.
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize_name(name);
        Attribute::ALL
            .into_iter()
            .find(|a| normalize_name(a.name()) == wanted)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Attribute {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::from_name(s).ok_or_else(|| EstimateError::UnknownAttribute(s.trim().to_string()))
    }
}

/// 이름 비교용 정규화: 소문자로 바꾸고 공백/구분자를 제거한다.
pub(crate) fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// 사용자가 입력한 항목별 값 묶음.
///
/// 범위 검사는 하지 않는다. 범위는 입력 화면([`MachineType::range`])에서 제한한다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputRecord {
    values: BTreeMap<Attribute, f64>,
}

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 빌더 형태로 값을 추가한다.
    pub fn with(mut self, attribute: Attribute, value: f64) -> Self {
        self.values.insert(attribute, value);
        self
    }

    pub fn set(&mut self, attribute: Attribute, value: f64) {
        self.values.insert(attribute, value);
    }

    pub fn remove(&mut self, attribute: Attribute) -> Option<f64> {
        self.values.remove(&attribute)
    }

    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        self.values.get(&attribute).copied()
    }

    /// 값이 없으면 `MissingAttribute` 오류를 돌려준다.
    pub fn require(&self, attribute: Attribute) -> Result<f64, EstimateError> {
        self.get(attribute)
            .ok_or(EstimateError::MissingAttribute(attribute))
    }

    pub fn contains(&self, attribute: Attribute) -> bool {
        self.values.contains_key(&attribute)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        self.values.iter().map(|(a, v)| (*a, *v))
    }

    /// 표시 이름을 키로 하는 맵에서 레코드를 만든다.
    /// 알 수 없는 키와, 정규화하면 같은 항목이 되는 키가 둘 이상이면 오류.
    pub fn from_named(values: &HashMap<String, f64>) -> Result<Self, EstimateError> {
        let mut record = InputRecord::new();
        for (name, value) in values {
            let attribute: Attribute = name.parse()?;
            if record.contains(attribute) {
                return Err(EstimateError::DuplicateAttribute(attribute));
            }
            record.set(attribute, *value);
        }
        Ok(record)
    }

    /// 표시 이름을 키로 하는 정렬된 맵으로 내보낸다.
    pub fn to_named(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(a, v)| (a.name().to_string(), v))
            .collect()
    }

    /// 입력 폼의 초기 상태: 시나리오에 포함된 항목은 범위 최솟값, 제외된 항목은 0.
    pub fn form_defaults(scenario: Scenario, machine: MachineType) -> Self {
        Attribute::ALL
            .into_iter()
            .map(|a| {
                let value = if scenario.includes(a) {
                    machine.range(a).min
                } else {
                    0.0
                };
                (a, value)
            })
            .collect()
    }

    /// 빠진 항목만 폼 기본값으로 채운다. 이미 있는 값은 건드리지 않는다.
    pub fn fill_missing(&mut self, scenario: Scenario, machine: MachineType) {
        for (attribute, value) in InputRecord::form_defaults(scenario, machine).iter() {
            self.values.entry(attribute).or_insert(value);
        }
    }
}

impl FromIterator<(Attribute, f64)> for InputRecord {
    fn from_iter<T: IntoIterator<Item = (Attribute, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_names_and_slugs() {
        assert_eq!("Initial Cost".parse::<Attribute>().unwrap(), Attribute::InitialCost);
        assert_eq!(
            "waste-management-cost".parse::<Attribute>().unwrap(),
            Attribute::WasteManagementCost
        );
        assert_eq!("toilet_usage_cost".parse::<Attribute>().unwrap(), Attribute::ToiletUsageCost);
        assert_eq!(" operators ".parse::<Attribute>().unwrap(), Attribute::Operators);
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "Coolant Cost".parse::<Attribute>().unwrap_err();
        assert!(matches!(err, EstimateError::UnknownAttribute(ref n) if n == "Coolant Cost"));
    }

    #[test]
    fn labels_use_currency_for_costs() {
        assert_eq!(Attribute::InitialCost.label("₦"), "Initial Cost (₦)");
        assert_eq!(Attribute::AreaOccupied.label("₦"), "Area Occupied (m²)");
        assert_eq!(Attribute::Operators.label("$"), "Operators (persons)");
    }

    #[test]
    fn form_defaults_zero_excluded_attributes() {
        let rec = InputRecord::form_defaults(Scenario::ExcludingOperators, MachineType::Milling);
        assert_eq!(rec.len(), 10);
        assert_eq!(rec.get(Attribute::Operators), Some(0.0));
        assert_eq!(rec.get(Attribute::Workpieces), Some(10.0));
        assert_eq!(rec.get(Attribute::InitialCost), Some(5_000_000.0));
    }

    #[test]
    fn fill_missing_keeps_existing_values() {
        let mut rec = InputRecord::new().with(Attribute::TimeSpent, 300.0);
        rec.fill_missing(Scenario::AllVariables, MachineType::Lathe);
        assert_eq!(rec.get(Attribute::TimeSpent), Some(300.0));
        assert_eq!(rec.get(Attribute::PowerRating), Some(15_000.0));
    }

    #[test]
    fn from_named_maps_keys() {
        let mut named = HashMap::new();
        named.insert("Cleaning Cost".to_string(), 5_000.0);
        let rec = InputRecord::from_named(&named).unwrap();
        assert_eq!(rec.require(Attribute::CleaningCost).unwrap(), 5_000.0);
        assert!(matches!(
            rec.require(Attribute::TimeSpent),
            Err(EstimateError::MissingAttribute(Attribute::TimeSpent))
        ));
    }

    #[test]
    fn from_named_rejects_keys_naming_the_same_attribute() {
        let mut named = HashMap::new();
        named.insert("Workpieces".to_string(), 10.0);
        named.insert("workpieces".to_string(), 30.0);
        assert_eq!(
            InputRecord::from_named(&named),
            Err(EstimateError::DuplicateAttribute(Attribute::Workpieces))
        );
    }
}
