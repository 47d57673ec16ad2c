use crate::app_config::{AttributeScan, Environment, ExportConfig};
use crate::ConfigError;

/// Load export configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_export_config() -> Result<ExportConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_export_config_from_env()
}

/// Load export configuration from environment variables already in the process.
///
/// Unlike [`load_export_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_export_config_from_env() -> Result<ExportConfig, ConfigError> {
    build_export_config(|key| std::env::var(key))
}

/// Build export configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup.
fn build_export_config<F>(lookup: F) -> Result<ExportConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    use rust_decimal::Decimal;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let list = |var: &str, default: &str| -> Vec<String> {
        or_default(var, default)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    };

    let env = parse_environment(&or_default("BATHCAT_ENV", "development"))?;
    let log_level = or_default("BATHCAT_LOG_LEVEL", "info");

    let tax_rate = or_default("BATHCAT_TAX_RATE", "1.21")
        .trim()
        .parse::<Decimal>()
        .map_err(|e| invalid("BATHCAT_TAX_RATE", e.to_string()))?;
    if tax_rate <= Decimal::ZERO {
        return Err(invalid(
            "BATHCAT_TAX_RATE",
            format!("tax rate must be greater than zero, got {tax_rate}"),
        ));
    }

    let category_id = or_default("BATHCAT_CATEGORY_ID", "13");

    let image_url_template = or_default(
        "BATHCAT_IMAGE_URL_TEMPLATE",
        "https://cdn.todomueblesdebano.com/image/upload/f_auto%2Cq_auto/v1/{public_id}",
    );
    if !image_url_template.contains("{public_id}") {
        return Err(invalid(
            "BATHCAT_IMAGE_URL_TEMPLATE",
            "template must contain {public_id}".to_string(),
        ));
    }
    let image_denylist = list("BATHCAT_IMAGE_DENYLIST", "");

    let first_product_id = parse_u64("BATHCAT_FIRST_PRODUCT_ID", "87")?;
    let product_id_step = parse_u64("BATHCAT_PRODUCT_ID_STEP", "1")?;
    if product_id_step == 0 {
        return Err(invalid(
            "BATHCAT_PRODUCT_ID_STEP",
            "step must be at least 1".to_string(),
        ));
    }

    let vocabulary_path = lookup("BATHCAT_VOCABULARY_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let attribute_scan = parse_attribute_scan(&or_default("BATHCAT_ATTRIBUTE_SCAN", "all"))?;

    let output_dir = PathBuf::from(or_default("BATHCAT_OUTPUT_DIR", "./out"));
    let outbox_dir = lookup("BATHCAT_OUTBOX_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let file_prefix = or_default("BATHCAT_FILE_PREFIX", "royo");

    let in_stock_text = or_default("BATHCAT_IN_STOCK_TEXT", "Disponible");
    let extra_tags = list("BATHCAT_EXTRA_TAGS", "muebles,baño");
    let delivery_template = or_default("BATHCAT_DELIVERY_TEMPLATE", "Entre {min} y {max} días");

    Ok(ExportConfig {
        env,
        log_level,
        tax_rate,
        category_id,
        image_url_template,
        image_denylist,
        first_product_id,
        product_id_step,
        vocabulary_path,
        attribute_scan,
        output_dir,
        outbox_dir,
        file_prefix,
        in_stock_text,
        extra_tags,
        delivery_template,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the value is not one of
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BATHCAT_ENV".to_string(),
            reason: format!(
                "unknown environment '{other}'; expected development, test, or production"
            ),
        }),
    }
}

fn parse_attribute_scan(s: &str) -> Result<AttributeScan, ConfigError> {
    match s {
        "all" => Ok(AttributeScan::AllVariants),
        "first" => Ok(AttributeScan::FirstVariant),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BATHCAT_ATTRIBUTE_SCAN".to_string(),
            reason: format!("unknown scan mode '{other}'; expected all or first"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
