use crate::config::toml_config::PaymentConfig;
use crate::domain::catalog::PricePlan;
use crate::utils::error::{IntakeError, Result};
use url::Url;

/// UPI QR image URL for paying the given plan: `{base}?vpa={upi_id}&amount={value}`.
pub fn qr_code_url(payment: &PaymentConfig, plan: &PricePlan) -> Result<String> {
    let mut url =
        Url::parse(payment.qr_base_url()).map_err(|e| IntakeError::InvalidConfigValueError {
            field: "payment.qr_base_url".to_string(),
            value: payment.qr_base_url().to_string(),
            reason: e.to_string(),
        })?;
    url.query_pairs_mut()
        .append_pair("vpa", &payment.upi_id)
        .append_pair("amount", plan.value);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;

    #[test]
    fn test_qr_code_url_for_plan() {
        let payment = PaymentConfig {
            upi_id: "studio@oksbi".to_string(),
            qr_base_url: None,
        };
        let plan = Catalog::standard().resolve_plan("apex").unwrap();

        assert_eq!(
            qr_code_url(&payment, plan).unwrap(),
            "https://upiqr.in/api/qr?vpa=studio%40oksbi&amount=399"
        );
    }
}
