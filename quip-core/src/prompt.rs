use crate::model::WeatherReport;

/// Build the instruction sent to the text generator.
pub fn compose_prompt(report: &WeatherReport) -> String {
    format!(
        "The weather in {} is {}°C and {}. Give me a funny, sarcastic 2-sentence weather report for this.",
        report.city, report.temperature_c, report.condition
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(city: &str, temperature_c: f64, condition: &str) -> WeatherReport {
        WeatherReport { city: city.into(), temperature_c, condition: condition.into() }
    }

    #[test]
    fn prompt_mentions_city_temperature_and_condition() {
        let prompt = compose_prompt(&report("London", 15.0, "clear sky"));

        assert!(prompt.contains("London"));
        assert!(prompt.contains("15°C"));
        assert!(prompt.contains("clear sky"));
        assert!(prompt.contains("sarcastic 2-sentence"));
    }

    #[test]
    fn fractional_temperatures_are_kept() {
        let prompt = compose_prompt(&report("Reykjavik", -2.37, "light snow"));
        assert!(prompt.contains("-2.37°C"));
    }
}
