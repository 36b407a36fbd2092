use super::prelude::{ConversionError, Quantity, UnitDescriptor, UnitRegistry};

fn registry() -> UnitRegistry {
    UnitRegistry::standard().expect("standard units")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_lookup_by_every_name() {
    let registry = registry();

    for name in ["meter", "meters", "metre", "m", "Meter", "METERS"] {
        assert_eq!(registry.find(name).map(|unit| unit.name.as_str()), Ok("meter"));
    }

    assert_eq!(registry.find("kPa").map(|unit| unit.quantity), Ok(Quantity::Pressure));
    assert_eq!(
        registry.find("furlong"),
        Err(ConversionError::UnknownUnit { unit: "furlong".into() })
    );
}

#[test]
fn test_linear_conversions() -> Result<(), ConversionError> {
    let registry = registry();

    assert_close(registry.convert(1.0, "km", "m")?, 1000.0);
    assert_close(registry.convert(12.0, "inches", "foot")?, 1.0);
    assert_close(registry.convert(1.0, "mile", "km")?, 1.609344);
    assert_close(registry.convert(2.0, "hours", "minutes")?, 120.0);
    assert_close(registry.convert(1.0, "kg", "lb")?, 2.2046226218487757);
    assert_close(registry.convert(1.0, "atm", "kPa")?, 101.325);

    Ok(())
}

#[test]
fn test_temperature_conversions() -> Result<(), ConversionError> {
    let registry = registry();

    assert_close(registry.convert(100.0, "celsius", "fahrenheit")?, 212.0);
    assert_close(registry.convert(32.0, "degF", "degC")?, 0.0);
    assert_close(registry.convert(0.0, "celsius", "kelvin")?, 273.15);
    assert_close(registry.convert(0.0, "K", "fahrenheit")?, -459.67);

    Ok(())
}

#[test]
fn test_same_unit_never_consults_registry() {
    let registry = UnitRegistry::new();

    assert_eq!(registry.convert(3.5, "parsec", "parsec"), Ok(3.5));
    assert!(registry.convert(3.5, "parsec", "meter").is_err());
}

#[test]
fn test_incompatible_quantities() {
    let registry = registry();

    assert_eq!(
        registry.convert(1.0, "meter", "second"),
        Err(ConversionError::IncompatibleUnits {
            from: "meter".into(),
            from_quantity: Quantity::Length,
            to: "second".into(),
            to_quantity: Quantity::Time,
        })
    );
}

#[test]
fn test_defined_units() -> Result<(), ConversionError> {
    let registry = registry();

    assert_close(registry.convert(1.0, "week", "day")?, 7.0);
    assert_close(registry.convert(3.0, "weeks", "days")?, 21.0);
    assert_close(registry.convert(1.0, "fortnight", "week")?, 2.0);
    assert_close(registry.convert(1.0, "wk", "hours")?, 168.0);

    Ok(())
}

#[test]
fn test_register_ratio() -> Result<(), ConversionError> {
    let mut registry = registry();

    registry.register_ratio("furlong", &["furlongs"], 220.0, "yard")?;

    assert_eq!(registry.find("furlongs")?.quantity, Quantity::Length);
    assert_close(registry.convert(8.0, "furlongs", "mile")?, 1.0);

    assert_eq!(
        registry.register_ratio("blink", &[], 0.3, "moment"),
        Err(ConversionError::UnknownUnit { unit: "moment".into() })
    );

    Ok(())
}

#[test]
fn test_every_registered_name_finds_its_unit() {
    let registry = registry();

    for unit in registry.units() {
        for name in unit.names() {
            assert_eq!(registry.find(name), Ok(unit), "name `{name}`");
        }
    }

    let last = registry.units().last().map(|unit| unit.name.as_str());
    assert_eq!(last, Some("fortnight"));
}

#[test]
fn test_register_rejects_duplicates_and_bad_ratios() {
    let mut registry = registry();
    let count = registry.units().count();

    assert_eq!(
        registry.register(UnitDescriptor::new("metro", Quantity::Length, 1.0).with_aliases(&["m"])),
        Err(ConversionError::DuplicateUnit { name: "m".into() })
    );
    assert!(registry.find("metro").is_err());

    assert_eq!(
        registry.register(UnitDescriptor::new("nothing", Quantity::Length, 0.0)),
        Err(ConversionError::InvalidRatio { unit: "nothing".into() })
    );

    assert_eq!(registry.units().count(), count);
}
