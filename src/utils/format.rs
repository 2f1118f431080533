// ============================================================================
// FORMAT - Formateo de valores para la UI
// ============================================================================

/// Fecha centinela que el ERP devuelve cuando el campo no está informado
const EMPTY_DATE_SENTINEL: &str = "01.01.1975 00:00:00";

/// Formatear un timestamp del ERP para mostrarlo en tabla.
/// El backend ya envía el formato final; solo se filtra el centinela.
pub fn format_date_time(value: &str) -> String {
    if value.is_empty() || value == EMPTY_DATE_SENTINEL {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// Parsear una cantidad introducida por el operario: entero no negativo
pub fn parse_quantity(raw: &str) -> Result<u32, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Lütfen miktarı girin!".to_string());
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| "Sadece sayı girebilirsiniz!".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fecha_centinela_se_muestra_como_guion() {
        assert_eq!(format_date_time("01.01.1975 00:00:00"), "-");
        assert_eq!(format_date_time(""), "-");
    }

    #[test]
    fn fecha_normal_pasa_sin_cambios() {
        assert_eq!(format_date_time("12.05.2025 08:30:00"), "12.05.2025 08:30:00");
    }

    #[test]
    fn cantidad_valida() {
        assert_eq!(parse_quantity("15"), Ok(15));
        assert_eq!(parse_quantity(" 0 "), Ok(0));
    }

    #[test]
    fn cantidad_invalida() {
        assert!(parse_quantity("").is_err());
        assert!(parse_quantity("-3").is_err());
        assert!(parse_quantity("3.5").is_err());
        assert!(parse_quantity("abc").is_err());
    }
}
