use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::attribute::InputRecord;
use crate::estimator::Estimate;
use crate::format::format_price;

/// 보고서 저장 시 발생 가능한 오류.
#[derive(Debug)]
pub enum ReportError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "report write failed: {e}"),
            ReportError::Serialize(e) => write!(f, "report serialization failed: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(value: std::io::Error) -> Self {
        ReportError::Io(value)
    }
}

impl From<toml::ser::Error> for ReportError {
    fn from(value: toml::ser::Error) -> Self {
        ReportError::Serialize(value)
    }
}

/// 항별 내역 한 줄.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermReport {
    pub attribute: String,
    pub coefficient: f64,
    pub value: f64,
    pub contribution: f64,
}

/// TOML로 내보내는 산정 보고서. 스칼라 필드가 테이블보다 먼저 와야 한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateReport {
    pub scenario: String,
    pub machine_type: String,
    pub raw_sum: f64,
    pub price: f64,
    pub clamped: bool,
    pub formatted: String,
    pub inputs: BTreeMap<String, f64>,
    pub terms: Vec<TermReport>,
}

impl EstimateReport {
    pub fn new(estimate: &Estimate, input: &InputRecord, currency_symbol: &str) -> Self {
        Self {
            scenario: estimate.scenario.name().to_string(),
            machine_type: estimate.machine_type.name().to_string(),
            raw_sum: estimate.raw_sum,
            price: estimate.price,
            clamped: estimate.clamped(),
            formatted: format_price(estimate.price, currency_symbol),
            inputs: input.to_named(),
            terms: estimate
                .terms
                .iter()
                .map(|t| TermReport {
                    attribute: t.attribute.name().to_string(),
                    coefficient: t.coefficient,
                    value: t.value,
                    contribution: t.contribution,
                })
                .collect(),
        }
    }

    pub fn to_toml(&self) -> Result<String, ReportError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 보고서를 지정 경로에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;
    use crate::estimator::estimate;
    use crate::machine::MachineType;
    use crate::scenario::Scenario;

    #[test]
    fn report_serializes_to_toml() {
        let input = InputRecord::form_defaults(Scenario::ExcludingOperators, MachineType::Lathe)
            .with(Attribute::TimeSpent, 400.0);
        let est = estimate(Scenario::ExcludingOperators, MachineType::Lathe, &input).unwrap();
        let report = EstimateReport::new(&est, &input, "₦");
        let text = report.to_toml().unwrap();
        assert!(text.contains("scenario = \"Excluding Operators\""));
        assert!(text.contains("[[terms]]"));

        let back: EstimateReport = toml::from_str(&text).unwrap();
        assert_eq!(back.terms.len(), 9);
        assert_eq!(back.inputs.get("Time Spent"), Some(&400.0));
        assert_eq!(back.price, est.price);
    }
}
