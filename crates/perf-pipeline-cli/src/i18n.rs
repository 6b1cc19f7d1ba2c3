// crates/perf-pipeline-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for English and Spanish output.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The pipeline CLI stores user-facing strings in a small translation
//! catalog so status lines, reports, chart labels, and errors stay
//! consistent. All runtime output should be routed through the
//! [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The locale is selected once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_', '.']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Es];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "perf-pipeline {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'es'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid ({backend} backend, table {table})."),
    ("input.not_found", "Input file not found: {path}"),
    ("input.load_failed", "Failed to read the JSON input: {error}"),
    ("db.connect_failed", "Could not connect to the database: {error}"),
    ("db.query_failed", "Error executing query: {error}"),
    ("chart.render_failed", "Failed to render chart: {error}"),
    ("pipeline.output_failed", "Failed to write progress output: {error}"),
    ("pipeline.json_failed", "Failed to serialize output: {error}"),
    ("pipeline.data_loaded", "Data loaded ({rows} records)."),
    ("pipeline.connected", "Connection established."),
    ("pipeline.table_dropped", "Table '{table}' dropped (if it existed)."),
    ("pipeline.table_created", "Table '{table}' created successfully."),
    ("pipeline.data_inserted", "Data inserted successfully ({rows} rows)."),
    ("pipeline.chart_written", "Chart written to {path}"),
    ("report.performance.header", "Mean, median and standard deviation of performance:"),
    ("report.salary.header", "Mean, median and standard deviation of salary:"),
    ("report.mean", "  mean: {value}"),
    ("report.median", "  median: {value}"),
    ("report.std_dev", "  standard deviation: {value}"),
    ("report.departments.header", "Total number of employees per department:"),
    ("report.departments.line", "  {department}: {count}"),
    ("report.departments.empty", "  (no departments)"),
    ("report.correlation.years", "Correlation between years with the company and performance:"),
    ("report.correlation.salary", "Correlation between salary and performance:"),
    ("report.value", "  {value}"),
    ("chart.histogram.title", "Performance histogram for the {department} department"),
    ("chart.axis.performance", "Performance"),
    ("chart.axis.frequency", "Frequency"),
    ("chart.axis.years", "Years with the company"),
    ("chart.axis.salary", "Salary"),
    ("chart.scatter.years", "Years with the company vs. Performance"),
    ("chart.scatter.salary", "Salary vs. Performance"),
];

/// Static Spanish catalog entries.
const CATALOG_ES: &[(&str, &str)] = &[
    ("main.version", "perf-pipeline {version}"),
    ("output.stream.stdout", "salida estándar"),
    ("output.stream.stderr", "salida de errores"),
    ("output.stream.unknown", "salida"),
    ("output.write_failed", "No se pudo escribir en {stream}: {error}"),
    ("i18n.lang.invalid_env", "Valor no válido para {env}: {value}. Se esperaba 'en' o 'es'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la salida que no está en inglés es una traducción automática y puede ser \
         inexacta.",
    ),
    ("config.load_failed", "No se pudo cargar la configuración: {error}"),
    ("config.validate.ok", "Configuración válida (backend {backend}, tabla {table})."),
    ("input.not_found", "El archivo JSON no se encontró: {path}"),
    ("input.load_failed", "Error al leer el archivo JSON: {error}"),
    ("db.connect_failed", "No se pudo conectar a la base de datos: {error}"),
    ("db.query_failed", "Error ejecutando la consulta: {error}"),
    ("chart.render_failed", "No se pudo generar el gráfico: {error}"),
    ("pipeline.output_failed", "No se pudo escribir el progreso: {error}"),
    ("pipeline.json_failed", "No se pudo serializar la salida: {error}"),
    ("pipeline.data_loaded", "Datos cargados ({rows} registros)."),
    ("pipeline.connected", "Conexión correcta."),
    ("pipeline.table_dropped", "Tabla '{table}' eliminada (si existía)."),
    ("pipeline.table_created", "Tabla '{table}' creada exitosamente."),
    ("pipeline.data_inserted", "Datos insertados exitosamente ({rows} filas)."),
    ("pipeline.chart_written", "Gráfico guardado en {path}"),
    ("report.performance.header", "Media, mediana y desviación estándar de rendimiento:"),
    ("report.salary.header", "Media, mediana y desviación estándar de salario:"),
    ("report.mean", "  media: {value}"),
    ("report.median", "  mediana: {value}"),
    ("report.std_dev", "  desviación estándar: {value}"),
    ("report.departments.header", "Número total de empleados por departamento:"),
    ("report.departments.line", "  {department}: {count}"),
    ("report.departments.empty", "  (sin departamentos)"),
    ("report.correlation.years", "Correlación entre años en la empresa y rendimiento:"),
    ("report.correlation.salary", "Correlación entre salario y rendimiento:"),
    ("report.value", "  {value}"),
    ("chart.histogram.title", "Histograma de rendimiento para el departamento de {department}"),
    ("chart.axis.performance", "Rendimiento"),
    ("chart.axis.frequency", "Frecuencia"),
    ("chart.axis.years", "Años con la empresa"),
    ("chart.axis.salary", "Salario"),
    ("chart.scatter.years", "Años con la empresa vs. Rendimiento"),
    ("chart.scatter.salary", "Salario vs. Rendimiento"),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_ES_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Es => CATALOG_ES_MAP.get_or_init(|| CATALOG_ES.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_for(current_locale(), key, args)
}

/// Translates `key` for an explicit `locale`.
#[must_use]
pub fn translate_for(locale: Locale, key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }
    substitute(template, &args)
}

/// Replaces `{name}` placeholders in one pass over `template`.
///
/// Substituted values are never rescanned, so a value that itself looks like
/// a placeholder is emitted verbatim. Unknown placeholders are kept as-is.
fn substitute(template: &str, args: &[MessageArg]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        result.push_str(&rest[.. start]);
        let after = &rest[start + 1 ..];
        let Some(end) = after.find('}') else {
            result.push_str(&rest[start ..]);
            return result;
        };
        let name = &after[.. end];
        match args.iter().find(|arg| arg.key == name) {
            Some(arg) => result.push_str(&arg.value),
            None => result.push_str(&rest[start ..= start + end + 1]),
        }
        rest = &after[end + 1 ..];
    }
    result.push_str(rest);
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
