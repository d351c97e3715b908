//! 가격 산정 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 계산을 공유한다.

pub mod app;
pub mod attribute;
pub mod cli;
pub mod config;
pub mod estimator;
pub mod format;
pub mod i18n;
pub mod logging;
pub mod machine;
pub mod report;
pub mod scenario;
pub mod ui_cli;

pub use attribute::{Attribute, InputRecord};
pub use estimator::{
    calculate_price, calculate_price_by_name, estimate, Estimate, EstimateError, PRICE_CEILING,
    PRICE_FLOOR,
};
pub use machine::{AttributeRange, MachineType};
pub use scenario::Scenario;
