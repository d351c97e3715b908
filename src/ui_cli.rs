use std::io::{self, Write};

use crate::app::AppError;
use crate::attribute::{Attribute, InputRecord};
use crate::config::Config;
use crate::estimator::{self, Estimate};
use crate::format::{format_amount, format_plain, format_price};
use crate::i18n::{self, keys, Translator};
use crate::machine::{AttributeRange, MachineType};
use crate::scenario::Scenario;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Estimate,
    Ranges,
    Coefficients,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_ESTIMATE));
    println!("{}", tr.t(keys::MAIN_MENU_RANGES));
    println!("{}", tr.t(keys::MAIN_MENU_COEFFICIENTS));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Estimate),
            "2" => return Ok(MenuChoice::Ranges),
            "3" => return Ok(MenuChoice::Coefficients),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 가격 산정 메뉴를 처리한다. 시나리오에서 빠진 항목은 묻지 않고 0으로 둔다.
pub fn handle_estimate(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ESTIMATE_HEADING));
    println!("{}", tr.t(keys::DISCLAIMER));
    let scenario = select_from(
        tr,
        tr.t(keys::ESTIMATE_SELECT_SCENARIO),
        &Scenario::ALL,
        cfg.default_scenario,
        |s| s.name(),
    )?;
    let machine = select_from(
        tr,
        tr.t(keys::ESTIMATE_SELECT_MACHINE),
        &MachineType::ALL,
        cfg.default_machine,
        |m| m.name(),
    )?;

    let mut input = InputRecord::new();
    for attribute in Attribute::ALL {
        let label = attribute.label(&cfg.currency_symbol);
        if !scenario.includes(attribute) {
            println!("{}", tr.tf(keys::ESTIMATE_SKIPPED, &[("label", label)]));
            input.set(attribute, 0.0);
            continue;
        }
        let value = read_bounded(tr, attribute, &label, machine.range(attribute))?;
        input.set(attribute, value);
    }

    let estimate = estimator::estimate(scenario, machine, &input)?;
    print_estimate(tr, &estimate, &cfg.currency_symbol);
    Ok(())
}

/// 기종별 입력 범위 표를 출력한다.
pub fn handle_ranges(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::RANGES_HEADING));
    print!("{}", render_ranges(&MachineType::ALL));
    Ok(())
}

/// 시나리오별 가중치 표를 출력한다.
pub fn handle_coefficients(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::COEFFICIENTS_HEADING));
    print!("{}", render_coefficients(tr, &Scenario::ALL));
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        tr.tf(
            keys::SETTINGS_CURRENT,
            &[
                ("scenario", cfg.default_scenario.name().to_string()),
                ("machine", cfg.default_machine.name().to_string()),
                ("language", cfg.language.clone()),
                ("currency", cfg.currency_symbol.clone()),
            ],
        )
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => return Ok(()),
        "1" => {
            cfg.default_scenario = select_from(
                tr,
                tr.t(keys::ESTIMATE_SELECT_SCENARIO),
                &Scenario::ALL,
                cfg.default_scenario,
                |s| s.name(),
            )?;
        }
        "2" => {
            cfg.default_machine = select_from(
                tr,
                tr.t(keys::ESTIMATE_SELECT_MACHINE),
                &MachineType::ALL,
                cfg.default_machine,
                |m| m.name(),
            )?;
        }
        "3" => {
            let lang = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let Some(lang) = i18n::language_setting(&lang) else {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(());
            };
            cfg.language = lang;
        }
        "4" => {
            let symbol = read_line(tr.t(keys::SETTINGS_PROMPT_CURRENCY))?;
            let symbol = symbol.trim();
            if symbol.is_empty() {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(());
            }
            cfg.currency_symbol = symbol.to_string();
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

/// 산정 결과와 항목별 내역을 출력한다.
pub fn print_estimate(tr: &Translator, estimate: &Estimate, currency_symbol: &str) {
    println!();
    print!("{}", render_breakdown(tr, estimate));
    if estimate.clamped() {
        println!(
            "{}",
            tr.tf(keys::ESTIMATE_CLAMPED, &[("raw", format_amount(estimate.raw_sum))])
        );
    }
    println!(
        "{}",
        tr.tf(
            keys::ESTIMATE_RESULT,
            &[("price", format_price(estimate.price, currency_symbol))]
        )
    );
}

/// 항목별 기여분 표 문자열.
pub fn render_breakdown(tr: &Translator, estimate: &Estimate) -> String {
    let mut out = format!("{}\n", tr.t(keys::ESTIMATE_BREAKDOWN));
    for term in &estimate.terms {
        out.push_str(&format!(
            "  {:<24}{:>14} x {:<10}= {:>12}\n",
            term.attribute.name(),
            format_plain(term.value),
            format_plain(term.coefficient),
            format_amount(term.contribution)
        ));
    }
    out.push_str(&format!(
        "  {:<51}{:>12}\n",
        tr.t(keys::ESTIMATE_RAW_SUM),
        format_amount(estimate.raw_sum)
    ));
    out
}

/// 기종별 범위 표 문자열.
pub fn render_ranges(machines: &[MachineType]) -> String {
    let mut out = String::new();
    for machine in machines {
        out.push_str(&format!("{}\n", machine.name()));
        for attribute in Attribute::ALL {
            let range = machine.range(attribute);
            out.push_str(&format!(
                "  {:<24}{:>12} - {:<12}\n",
                attribute.name(),
                format_plain(range.min),
                format_plain(range.max)
            ));
        }
    }
    out
}

/// 시나리오별 가중치 표 문자열. 제외된 항목은 "-"로 표시한다.
pub fn render_coefficients(tr: &Translator, scenarios: &[Scenario]) -> String {
    let mut out = String::new();
    for scenario in scenarios {
        out.push_str(&format!("{}\n", scenario.name()));
        for attribute in Attribute::ALL {
            let cell = scenario
                .coefficient(attribute)
                .map(format_plain)
                .unwrap_or_else(|| tr.t(keys::COEFFICIENTS_NOT_USED).to_string());
            out.push_str(&format!("  {:<24}{:>10}\n", attribute.name(), cell));
        }
    }
    out
}

/// 번호 목록에서 하나를 고른다. 엔터만 치면 기본값.
fn select_from<T: Copy + PartialEq>(
    tr: &Translator,
    title: &str,
    options: &[T],
    default: T,
    name: impl Fn(T) -> &'static str,
) -> Result<T, AppError> {
    println!("{title}");
    for (i, opt) in options.iter().enumerate() {
        let marker = if *opt == default { " *" } else { "" };
        println!("  {}) {}{marker}", i + 1, name(*opt));
    }
    let hint = tr.tf(keys::ESTIMATE_DEFAULT_HINT, &[("default", name(default).to_string())]);
    loop {
        let sel = read_line(&format!("{hint} {}", tr.t(keys::PROMPT_SELECT)))?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(default);
        }
        match sel.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(options[n - 1]),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 범위 안의 값을 받을 때까지 다시 묻는다. 엔터만 치면 최솟값(폼 초기값)을 쓴다.
fn read_bounded(
    tr: &Translator,
    attribute: Attribute,
    label: &str,
    range: AttributeRange,
) -> Result<f64, AppError> {
    let prompt = tr.tf(
        keys::ESTIMATE_PROMPT_VALUE,
        &[
            ("label", label.to_string()),
            ("min", format_plain(range.min)),
            ("max", format_plain(range.max)),
        ],
    );
    loop {
        let s = read_line(&prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(range.min);
        }
        let value = match parse_number(s) {
            Some(v) if !attribute.is_count() || v.fract() == 0.0 => v,
            _ => {
                println!("{}", tr.t(keys::ERROR_INVALID_NUMBER));
                continue;
            }
        };
        if range.contains(value) {
            return Ok(value);
        }
        println!(
            "{}",
            tr.tf(
                keys::ERROR_OUT_OF_RANGE,
                &[("min", format_plain(range.min)), ("max", format_plain(range.max))]
            )
        );
    }
}

/// "2,000,000"처럼 쉼표가 섞인 숫자도 받는다.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let cleaned: String = s.chars().filter(|c| *c != ',' && *c != '_').collect();
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    let n = io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    if n == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed",
        )));
    }
    Ok(buf)
}
