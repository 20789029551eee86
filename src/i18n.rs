use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_TANK_SIZING: &str = "main_menu.tank_sizing";
    pub const MAIN_MENU_VENT_ANALYSIS: &str = "main_menu.vent_analysis";
    pub const MAIN_MENU_UNIT_CONVERSION: &str = "main_menu.unit_conversion";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const SIZING_HEADING: &str = "tank_sizing.heading";
    pub const SIZING_ORIENTATION_OPTIONS: &str = "tank_sizing.orientation_options";
    pub const PROMPT_ORIENTATION: &str = "prompt.orientation";
    pub const PROMPT_DIAMETER: &str = "prompt.diameter";
    pub const PROMPT_HEIGHT: &str = "prompt.height";
    pub const PROMPT_LENGTH: &str = "prompt.length";
    pub const RESULT_VOLUME: &str = "result.volume";
    pub const RESULT_REQUIRED_FLOW: &str = "result.required_flow";

    pub const ANALYSIS_HEADING: &str = "vent_analysis.heading";
    pub const ANALYSIS_NOTE_BOUNDS: &str = "vent_analysis.note_bounds";
    pub const PROMPT_INLET_COORDS: &str = "prompt.inlet_coords";
    pub const PROMPT_OUTLET_COORDS: &str = "prompt.outlet_coords";
    pub const PROMPT_COORD_X: &str = "prompt.coord_x";
    pub const PROMPT_COORD_Y: &str = "prompt.coord_y";
    pub const PROMPT_COORD_Z: &str = "prompt.coord_z";
    pub const RESULT_COVERAGE: &str = "result.coverage";
    pub const RESULT_STREAMLINES: &str = "result.streamlines";
    pub const RESULT_COMPLIANT: &str = "result.compliant";
    pub const RESULT_NON_COMPLIANT: &str = "result.non_compliant";
    pub const PROMPT_REPORT_PATH: &str = "prompt.report_path";
    pub const REPORT_SAVED: &str = "report.saved";

    pub const UNIT_CONVERSION_HEADING: &str = "unit_conversion.heading";
    pub const UNIT_CONVERSION_OPTIONS: &str = "unit_conversion.options";
    pub const UNIT_CONVERSION_PROMPT_KIND: &str = "unit_conversion.prompt_kind";
    pub const UNIT_CONVERSION_PROMPT_VALUE: &str = "unit_conversion.prompt_value";
    pub const UNIT_CONVERSION_PROMPT_FROM_UNIT: &str = "unit_conversion.prompt_from_unit";
    pub const UNIT_CONVERSION_PROMPT_TO_UNIT: &str = "unit_conversion.prompt_to_unit";
    pub const UNIT_CONVERSION_RESULT: &str = "unit_conversion.result";
    pub const UNIT_CONVERSION_UNSUPPORTED: &str = "unit_conversion.unsupported";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_UNIT_SYSTEM: &str = "settings.current_unit_system";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
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

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 한국어 번역이 없으면 영어 문자열로 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "en-uk" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
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
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
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
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
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

    for (k, v) in table {
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
        MAIN_MENU_TITLE => "\n=== C-NLOPB Tank Ventilation Toolbox ===",
        MAIN_MENU_TANK_SIZING => "1) Tank sizing",
        MAIN_MENU_VENT_ANALYSIS => "2) Ventilation analysis",
        MAIN_MENU_UNIT_CONVERSION => "3) Unit converter",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        SIZING_HEADING => "\n-- Tank Sizing --",
        SIZING_ORIENTATION_OPTIONS => "1) Vertical  2) Horizontal",
        PROMPT_ORIENTATION => "Orientation: ",
        PROMPT_DIAMETER => "Diameter: ",
        PROMPT_HEIGHT => "Height: ",
        PROMPT_LENGTH => "Length: ",
        RESULT_VOLUME => "Volume:",
        RESULT_REQUIRED_FLOW => "Required flow (12 ACH):",
        ANALYSIS_HEADING => "\n-- Ventilation Analysis --",
        ANALYSIS_NOTE_BOUNDS => "Note: inlet/outlet coordinates are clamped to the tank bounding box.",
        PROMPT_INLET_COORDS => "Inlet position",
        PROMPT_OUTLET_COORDS => "Outlet position",
        PROMPT_COORD_X => "  X: ",
        PROMPT_COORD_Y => "  Y: ",
        PROMPT_COORD_Z => "  Z: ",
        RESULT_COVERAGE => "Coverage:",
        RESULT_STREAMLINES => "Traced streamlines:",
        RESULT_COMPLIANT => "COMPLIANT (coverage >= 85%)",
        RESULT_NON_COMPLIANT => "NON-COMPLIANT (coverage < 85%)",
        PROMPT_REPORT_PATH => "Report file path (enter to skip): ",
        REPORT_SAVED => "Report saved:",
        UNIT_CONVERSION_HEADING => "\n-- Unit Conversion --",
        UNIT_CONVERSION_OPTIONS => "1) Length  2) Volume  3) Volumetric flow",
        UNIT_CONVERSION_PROMPT_KIND => "Enter item number: ",
        UNIT_CONVERSION_PROMPT_VALUE => "Value: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "From unit (ex: m, ft, m3/h): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "To unit (ex: ft, m3, cfh): ",
        UNIT_CONVERSION_RESULT => "Result:",
        UNIT_CONVERSION_UNSUPPORTED => "Unsupported selection.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "Current unit system:",
        SETTINGS_OPTIONS => "1) Metric  2) Imperial",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; unit system unchanged.",
        SETTINGS_SAVED => "Unit system changed to:",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        _ => "[missing translation]",
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== C-NLOPB Tank Ventilation Toolbox ===",
        MAIN_MENU_TANK_SIZING => "1) 탱크 사이징",
        MAIN_MENU_VENT_ANALYSIS => "2) 환기 해석",
        MAIN_MENU_UNIT_CONVERSION => "3) 단위 변환기",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        SIZING_HEADING => "\n-- 탱크 사이징 --",
        SIZING_ORIENTATION_OPTIONS => "1) 수직  2) 수평",
        PROMPT_ORIENTATION => "방향 선택: ",
        PROMPT_DIAMETER => "직경: ",
        PROMPT_HEIGHT => "높이: ",
        PROMPT_LENGTH => "길이: ",
        RESULT_VOLUME => "체적:",
        RESULT_REQUIRED_FLOW => "필요 환기량 (12 ACH):",
        ANALYSIS_HEADING => "\n-- 환기 해석 --",
        ANALYSIS_NOTE_BOUNDS => "참고: 입구/출구 좌표는 탱크 외접 박스 범위로 클램프됩니다.",
        PROMPT_INLET_COORDS => "입구 위치",
        PROMPT_OUTLET_COORDS => "출구 위치",
        PROMPT_COORD_X => "  X: ",
        PROMPT_COORD_Y => "  Y: ",
        PROMPT_COORD_Z => "  Z: ",
        RESULT_COVERAGE => "커버리지:",
        RESULT_STREAMLINES => "추적된 유선:",
        RESULT_COMPLIANT => "적합 (커버리지 85% 이상)",
        RESULT_NON_COMPLIANT => "부적합 (커버리지 85% 미만)",
        PROMPT_REPORT_PATH => "리포트 파일 경로 (건너뛰려면 엔터): ",
        REPORT_SAVED => "리포트를 저장했습니다:",
        UNIT_CONVERSION_HEADING => "\n-- 단위 변환 --",
        UNIT_CONVERSION_OPTIONS => "1) 길이  2) 체적  3) 체적 유량",
        UNIT_CONVERSION_PROMPT_KIND => "항목 번호를 입력: ",
        UNIT_CONVERSION_PROMPT_VALUE => "값 입력: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "입력 단위(ex: m, ft, m3/h): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "변환 단위(ex: ft, m3, cfh): ",
        UNIT_CONVERSION_RESULT => "변환 결과:",
        UNIT_CONVERSION_UNSUPPORTED => "지원하지 않는 번호입니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "현재 단위 시스템:",
        SETTINGS_OPTIONS => "1) Metric  2) Imperial",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "단위 시스템이 변경되었습니다:",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        _ => return None,
    })
}
