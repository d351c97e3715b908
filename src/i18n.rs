use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const DISCLAIMER: &str = "general.disclaimer";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ESTIMATE: &str = "main_menu.estimate";
    pub const MAIN_MENU_RANGES: &str = "main_menu.ranges";
    pub const MAIN_MENU_COEFFICIENTS: &str = "main_menu.coefficients";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_OUT_OF_RANGE: &str = "error.out_of_range";

    pub const ESTIMATE_HEADING: &str = "estimate.heading";
    pub const ESTIMATE_SELECT_SCENARIO: &str = "estimate.select_scenario";
    pub const ESTIMATE_SELECT_MACHINE: &str = "estimate.select_machine";
    pub const ESTIMATE_DEFAULT_HINT: &str = "estimate.default_hint";
    pub const ESTIMATE_PROMPT_VALUE: &str = "estimate.prompt_value";
    pub const ESTIMATE_SKIPPED: &str = "estimate.skipped";
    pub const ESTIMATE_RESULT: &str = "estimate.result";
    pub const ESTIMATE_CLAMPED: &str = "estimate.clamped";
    pub const ESTIMATE_BREAKDOWN: &str = "estimate.breakdown";
    pub const ESTIMATE_RAW_SUM: &str = "estimate.raw_sum";
    pub const ESTIMATE_REPORT_SAVED: &str = "estimate.report_saved";

    pub const RANGES_HEADING: &str = "ranges.heading";
    pub const COEFFICIENTS_HEADING: &str = "coefficients.heading";
    pub const COEFFICIENTS_NOT_USED: &str = "coefficients.not_used";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_CURRENCY: &str = "settings.prompt_currency";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_APP_TITLE: &str = "gui.app_title";
    pub const GUI_SCENARIO: &str = "gui.scenario";
    pub const GUI_MACHINE: &str = "gui.machine";
    pub const GUI_INPUTS: &str = "gui.inputs";
    pub const GUI_CALCULATE: &str = "gui.calculate";
    pub const GUI_RESET: &str = "gui.reset";
    pub const GUI_EXPORT: &str = "gui.export";
    pub const GUI_EXPORTED: &str = "gui.exported";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_ABOUT: &str = "gui.about";
    pub const GUI_LANGUAGE: &str = "gui.language";
    pub const GUI_LANGUAGE_AUTO: &str = "gui.language_auto";
    pub const GUI_CURRENCY: &str = "gui.currency";
    pub const GUI_ALPHA: &str = "gui.alpha";
    pub const GUI_SAVE: &str = "gui.save";
    pub const GUI_SAVED: &str = "gui.saved";
    pub const GUI_COL_ATTRIBUTE: &str = "gui.col_attribute";
    pub const GUI_COL_COEFFICIENT: &str = "gui.col_coefficient";
    pub const GUI_COL_VALUE: &str = "gui.col_value";
    pub const GUI_COL_CONTRIBUTION: &str = "gui.col_contribution";
    pub const GUI_ABOUT_BODY: &str = "gui.about_body";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        tracing::debug!(
            lang = lang_code,
            overrides = overrides.as_ref().map_or(0, HashMap::len),
            "translator ready"
        );
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾고, 한국어 문자열이 없으면 영어로 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        }
    }

    /// `{name}` 자리표시자를 채운 번역 문자열.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

/// `{key}` 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

/// 설정에 저장할 언어 값. "auto"는 그대로 두고, 지원하지 않는 언어면 None.
pub fn language_setting(input: &str) -> Option<String> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("auto") {
        return Some("auto".into());
    }
    normalize_lang(input)
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" | "en-gb" | "en-ng" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    lang.split_once(['-', '_'])
        .and_then(|(base, _)| try_load(base))
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Table = toml::from_str(src).ok()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in &value {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        DISCLAIMER => "This tool estimates the price of various workshop machines based on assigned coefficients. The coefficients used in this model are assigned arbitrarily for illustrative purposes.",
        MAIN_MENU_TITLE => "\n=== Workshop Machine Price Estimator ===",
        MAIN_MENU_ESTIMATE => "1) Estimate price",
        MAIN_MENU_RANGES => "2) Machine input ranges",
        MAIN_MENU_COEFFICIENTS => "3) Scenario coefficients",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_OUT_OF_RANGE => "Value must be between {min} and {max}.",
        ESTIMATE_HEADING => "\n-- Estimate Price --",
        ESTIMATE_SELECT_SCENARIO => "Select Scenario",
        ESTIMATE_SELECT_MACHINE => "Select Machine Type",
        ESTIMATE_DEFAULT_HINT => "(Enter = {default})",
        ESTIMATE_PROMPT_VALUE => "{label} [{min} - {max}]: ",
        ESTIMATE_SKIPPED => "{label}: not used in this scenario",
        ESTIMATE_RESULT => "The estimated price is: {price}",
        ESTIMATE_CLAMPED => "Weighted sum {raw} was clamped to the allowed price range.",
        ESTIMATE_BREAKDOWN => "Breakdown:",
        ESTIMATE_RAW_SUM => "Weighted sum",
        ESTIMATE_REPORT_SAVED => "Report saved: {path}",
        RANGES_HEADING => "\n-- Machine Input Ranges --",
        COEFFICIENTS_HEADING => "\n-- Scenario Coefficients --",
        COEFFICIENTS_NOT_USED => "-",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current: scenario={scenario}, machine={machine}, language={language}, currency={currency}",
        SETTINGS_OPTIONS => "1) Default scenario  2) Default machine  3) Language  4) Currency symbol",
        SETTINGS_PROMPT_CHANGE => "Number to change (Enter to cancel): ",
        SETTINGS_PROMPT_LANGUAGE => "Language (auto/en-us/ko-kr): ",
        SETTINGS_PROMPT_CURRENCY => "Currency symbol: ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Settings updated.",
        GUI_APP_TITLE => "Workshop Machine Price Estimator",
        GUI_SCENARIO => "Select Scenario",
        GUI_MACHINE => "Select Machine Type",
        GUI_INPUTS => "Inputs",
        GUI_CALCULATE => "Calculate Price",
        GUI_RESET => "Reset to minimums",
        GUI_EXPORT => "Export report…",
        GUI_EXPORTED => "Report saved: {path}",
        GUI_SETTINGS => "Settings",
        GUI_ABOUT => "About",
        GUI_LANGUAGE => "Language",
        GUI_LANGUAGE_AUTO => "System",
        GUI_CURRENCY => "Currency symbol",
        GUI_ALPHA => "Window transparency",
        GUI_SAVE => "Save settings",
        GUI_SAVED => "Saved.",
        GUI_COL_ATTRIBUTE => "Attribute",
        GUI_COL_COEFFICIENT => "Coefficient",
        GUI_COL_VALUE => "Value",
        GUI_COL_CONTRIBUTION => "Contribution",
        GUI_ABOUT_BODY => "Price = Σ coefficient × value over the attributes of the selected scenario, clamped to [20,000, 300,000]. The machine type only bounds the inputs.",
        _ => "[missing translation]",
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        DISCLAIMER => "지정된 가중치로 공작기계 가격을 추정합니다. 가중치는 예시를 위해 임의로 정한 값입니다.",
        MAIN_MENU_TITLE => "\n=== 공작기계 가격 추정기 ===",
        MAIN_MENU_ESTIMATE => "1) 가격 산정",
        MAIN_MENU_RANGES => "2) 기종별 입력 범위",
        MAIN_MENU_COEFFICIENTS => "3) 시나리오 가중치",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_OUT_OF_RANGE => "{min} ~ {max} 사이 값을 입력하세요.",
        ESTIMATE_HEADING => "\n-- 가격 산정 --",
        ESTIMATE_SELECT_SCENARIO => "시나리오 선택",
        ESTIMATE_SELECT_MACHINE => "기종 선택",
        ESTIMATE_DEFAULT_HINT => "(엔터 = {default})",
        ESTIMATE_PROMPT_VALUE => "{label} [{min} - {max}]: ",
        ESTIMATE_SKIPPED => "{label}: 이 시나리오에서는 사용하지 않음",
        ESTIMATE_RESULT => "추정 가격: {price}",
        ESTIMATE_CLAMPED => "가중합 {raw} 이(가) 허용 가격 구간으로 조정되었습니다.",
        ESTIMATE_BREAKDOWN => "항목별 내역:",
        ESTIMATE_RAW_SUM => "가중합",
        ESTIMATE_REPORT_SAVED => "보고서 저장: {path}",
        RANGES_HEADING => "\n-- 기종별 입력 범위 --",
        COEFFICIENTS_HEADING => "\n-- 시나리오 가중치 --",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재: 시나리오={scenario}, 기종={machine}, 언어={language}, 통화={currency}",
        SETTINGS_OPTIONS => "1) 기본 시나리오  2) 기본 기종  3) 언어  4) 통화 기호",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_PROMPT_LANGUAGE => "언어 (auto/en-us/ko-kr): ",
        SETTINGS_PROMPT_CURRENCY => "통화 기호: ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 변경되었습니다.",
        GUI_APP_TITLE => "공작기계 가격 추정기",
        GUI_SCENARIO => "시나리오 선택",
        GUI_MACHINE => "기종 선택",
        GUI_INPUTS => "입력값",
        GUI_CALCULATE => "가격 계산",
        GUI_RESET => "최솟값으로 초기화",
        GUI_EXPORT => "보고서 내보내기…",
        GUI_EXPORTED => "보고서 저장: {path}",
        GUI_SETTINGS => "설정",
        GUI_ABOUT => "정보",
        GUI_LANGUAGE => "언어",
        GUI_LANGUAGE_AUTO => "시스템",
        GUI_CURRENCY => "통화 기호",
        GUI_ALPHA => "창 투명도",
        GUI_SAVE => "설정 저장",
        GUI_SAVED => "저장했습니다.",
        GUI_COL_ATTRIBUTE => "항목",
        GUI_COL_COEFFICIENT => "가중치",
        GUI_COL_VALUE => "값",
        GUI_COL_CONTRIBUTION => "기여분",
        GUI_ABOUT_BODY => "가격 = 선택한 시나리오 항목들의 (가중치 × 값) 합계를 [20,000, 300,000] 구간으로 자른 값입니다. 기종은 입력 범위만 정합니다.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_cli_then_config() {
        assert_eq!(resolve_language("ko", Some("en-us")), "ko-kr");
        assert_eq!(resolve_language("auto", Some("ko")), "ko-kr");
        assert_eq!(resolve_language("EN-GB", None), "en-us");
    }

    #[test]
    fn language_setting_rejects_unsupported_languages() {
        assert_eq!(language_setting(" Auto ").as_deref(), Some("auto"));
        assert_eq!(language_setting("ko").as_deref(), Some("ko-kr"));
        assert_eq!(language_setting("en-GB").as_deref(), Some("en-us"));
        assert_eq!(language_setting("fr"), None);
        assert_eq!(language_setting(""), None);
    }

    #[test]
    fn korean_falls_back_to_english_for_missing_keys() {
        let tr = Translator::new("ko-kr");
        assert_eq!(tr.language(), Language::Ko);
        assert_eq!(tr.t(keys::MAIN_MENU_ESTIMATE), "1) 가격 산정");
        assert_eq!(tr.t(keys::COEFFICIENTS_NOT_USED), "-");
    }

    #[test]
    fn unknown_code_is_english() {
        let tr = Translator::new("fr-fr");
        assert_eq!(tr.language_code(), "en");
        assert_eq!(tr.t("no.such.key"), "[missing translation]");
    }

    #[test]
    fn template_placeholders_are_filled() {
        let tr = Translator::new("en-us");
        let s = tr.tf(keys::ESTIMATE_RESULT, &[("price", "₦47,029.00".into())]);
        assert_eq!(s, "The estimated price is: ₦47,029.00");
    }

    #[test]
    fn nested_pack_keys_are_flattened() {
        let map = parse_toml_to_map("[estimate]\nresult = \"Price: {price}\"\n").unwrap();
        assert_eq!(map.get("estimate.result").map(String::as_str), Some("Price: {price}"));
        assert!(parse_toml_to_map("answer = 42").is_none());
    }

    #[test]
    fn pack_directory_overrides_builtins() {
        let dir = std::env::temp_dir().join(format!("price_estimator_pack_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("en.toml"), "[gui]\ncalculate = \"Compute\"\n").unwrap();
        let tr = Translator::new_with_pack("en-us", dir.to_str());
        assert_eq!(tr.t(keys::GUI_CALCULATE), "Compute");
        assert_eq!(tr.t(keys::GUI_RESET), "Reset to minimums");
        let _ = fs::remove_dir_all(&dir);
    }
}
