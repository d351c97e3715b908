use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::attribute::{Attribute, InputRecord};
use crate::cli::EstimateArgs;
use crate::config::{Config, ConfigError};
use crate::estimator::{self, Estimate, EstimateError};
use crate::i18n::{self, keys, Translator};
use crate::machine::MachineType;
use crate::report::{EstimateReport, ReportError};
use crate::scenario::Scenario;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 가격 산정 오류
    Estimate(EstimateError),
    /// 보고서 저장 오류
    Report(ReportError),
    /// 입력 파일 파싱 오류
    InputFile(toml::de::Error),
    /// `NAME=NUMBER` 형식이 아닌 값 지정
    InvalidAssignment(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Config(e) => write!(f, "{e}"),
            AppError::Estimate(e) => write!(f, "{e}"),
            AppError::Report(e) => write!(f, "{e}"),
            AppError::InputFile(e) => write!(f, "input file parse error: {e}"),
            AppError::InvalidAssignment(s) => {
                write!(f, "expected NAME=NUMBER, got: {s}")
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<EstimateError> for AppError {
    fn from(value: EstimateError) -> Self {
        AppError::Estimate(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        AppError::Report(value)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(value: toml::de::Error) -> Self {
        AppError::InputFile(value)
    }
}

/// 설정의 언어/언어팩으로 번역기를 만든다. `cli_lang`이 있으면 설정보다 우선한다.
pub fn translator_for(config: &Config, cli_lang: Option<&str>) -> Translator {
    let lang =
        i18n::resolve_language(cli_lang.unwrap_or("auto"), Some(config.language.as_str()));
    Translator::new_with_pack(&lang, config.language_pack_dir.as_deref())
}

/// 설정 메뉴에서 언어가 바뀌었으면 번역기를 다시 만든다.
fn refresh_translator(tr: &mut Translator, previous_language: &str, config: &Config) {
    if config.language != previous_language {
        *tr = translator_for(config, None);
        info!(lang = tr.language_code(), "language switched");
    }
}

/// 대화형 CLI 메인 루프를 실행한다. 종료 시 설정을 저장한다.
pub fn run(config: &mut Config, config_path: &Path, mut tr: Translator) -> Result<(), AppError> {
    let tr = &mut tr;
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Estimate => {
                // 산정 오류는 메뉴로 돌아가서 다시 시도할 수 있게 한다.
                match ui_cli::handle_estimate(tr, config) {
                    Ok(()) => {}
                    Err(e @ AppError::Io(_)) => return Err(e),
                    Err(other) => println!("{}: {other}", tr.t(keys::ERROR_PREFIX)),
                }
            }
            MenuChoice::Ranges => ui_cli::handle_ranges(tr)?,
            MenuChoice::Coefficients => ui_cli::handle_coefficients(tr)?,
            MenuChoice::Settings => {
                let previous_language = config.language.clone();
                ui_cli::handle_settings(tr, config)?;
                refresh_translator(tr, &previous_language, config);
                config.save_to(config_path)?;
            }
            MenuChoice::Exit => {
                config.save_to(config_path)?;
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

/// `estimate` 서브커맨드: 인자/파일로 받은 값으로 한 번 산정하고 결과를 출력한다.
pub fn estimate_command(
    cfg: &Config,
    tr: &Translator,
    args: &EstimateArgs,
) -> Result<Estimate, AppError> {
    let scenario = match &args.scenario {
        Some(name) => name.parse::<Scenario>()?,
        None => cfg.default_scenario,
    };
    let machine = match &args.machine {
        Some(name) => name.parse::<MachineType>()?,
        None => cfg.default_machine,
    };
    let input = build_input(args, scenario, machine)?;
    let estimate = estimator::estimate(scenario, machine, &input)?;
    ui_cli::print_estimate(tr, &estimate, &cfg.currency_symbol);

    if let Some(path) = &args.output {
        EstimateReport::new(&estimate, &input, &cfg.currency_symbol).save(path)?;
        info!(path = %path.display(), "report written");
        println!(
            "{}",
            tr.tf(keys::ESTIMATE_REPORT_SAVED, &[("path", path.display().to_string())])
        );
    }
    Ok(estimate)
}

/// 입력 파일 → `--value` 순으로 값을 덮어써서 레코드를 만든다.
///
/// 엄격 모드가 아니면 빠진 항목을 폼 초기값(범위 최솟값, 제외 항목은 0)으로 채운다.
/// 엄격 모드에서는 빠진 값은 산정 단계에서 `MissingAttribute`로, 범위 밖 값은
/// `OutOfRange`로 거부된다.
pub fn build_input(
    args: &EstimateArgs,
    scenario: Scenario,
    machine: MachineType,
) -> Result<InputRecord, AppError> {
    let mut input = match &args.input {
        Some(path) => load_input_file(path)?,
        None => InputRecord::new(),
    };
    for assignment in &args.values {
        let (attribute, value) = parse_assignment(assignment)?;
        input.set(attribute, value);
    }

    if args.strict {
        if let Some(violation) = machine.out_of_range(scenario, &input).into_iter().next() {
            return Err(EstimateError::OutOfRange(violation).into());
        }
    } else {
        for violation in machine.out_of_range(scenario, &input) {
            warn!(%violation, "input outside machine range");
        }
        input.fill_missing(scenario, machine);
    }
    Ok(input)
}

/// `"Initial Cost=2000000"` 형식을 해석한다.
pub fn parse_assignment(s: &str) -> Result<(Attribute, f64), AppError> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| AppError::InvalidAssignment(s.to_string()))?;
    let attribute: Attribute = name.parse()?;
    let value =
        ui_cli::parse_number(value).ok_or_else(|| AppError::InvalidAssignment(s.to_string()))?;
    Ok((attribute, value))
}

/// 항목 이름을 키로 하는 TOML 파일을 읽는다.
pub fn load_input_file(path: &Path) -> Result<InputRecord, AppError> {
    let content = fs::read_to_string(path)?;
    let named: HashMap<String, f64> = toml::from_str(&content)?;
    Ok(InputRecord::from_named(&named)?)
}
