use std::{collections::HashMap, fmt::Display};

use super::error::ConversionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Length,
    Mass,
    Time,
    Temperature,
    Volume,
    Area,
    Speed,
    Energy,
    Pressure,
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Length => "length",
            Self::Mass => "mass",
            Self::Time => "time",
            Self::Temperature => "temperature",
            Self::Volume => "volume",
            Self::Area => "area",
            Self::Speed => "speed",
            Self::Energy => "energy",
            Self::Pressure => "pressure",
        };

        write!(f, "{name}")
    }
}

/// A unit of some quantity, convertible to the quantity's base unit with
/// `base = magnitude * ratio + offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitDescriptor {
    pub name: String,
    pub aliases: Vec<String>,
    pub quantity: Quantity,
    pub ratio: f64,
    pub offset: f64,
}

impl UnitDescriptor {
    pub fn new(name: &str, quantity: Quantity, ratio: f64) -> Self {
        Self {
            name: name.to_string(),
            aliases: vec![],
            quantity,
            ratio,
            offset: 0.0,
        }
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|alias| alias.to_string()).collect();
        self
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
    }

    pub fn to_base(&self, magnitude: f64) -> f64 {
        magnitude * self.ratio + self.offset
    }

    pub fn from_base(&self, magnitude: f64) -> f64 {
        (magnitude - self.offset) / self.ratio
    }
}

// (quantity, name, plural and symbols, ratio to the base unit, offset)
const STANDARD_UNITS: &[(Quantity, &str, &[&str], f64, f64)] = &[
    (Quantity::Length, "meter", &["meters", "metre", "metres", "m"], 1.0, 0.0),
    (Quantity::Length, "kilometer", &["kilometers", "kilometre", "kilometres", "km"], 1e3, 0.0),
    (Quantity::Length, "centimeter", &["centimeters", "centimetre", "centimetres", "cm"], 1e-2, 0.0),
    (Quantity::Length, "millimeter", &["millimeters", "millimetre", "millimetres", "mm"], 1e-3, 0.0),
    (Quantity::Length, "micrometer", &["micrometers", "micron", "microns", "um"], 1e-6, 0.0),
    (Quantity::Length, "nanometer", &["nanometers", "nm"], 1e-9, 0.0),
    (Quantity::Length, "angstrom", &["angstroms"], 1e-10, 0.0),
    (Quantity::Length, "inch", &["inches"], 0.0254, 0.0),
    (Quantity::Length, "foot", &["feet", "ft"], 0.3048, 0.0),
    (Quantity::Length, "yard", &["yards", "yd"], 0.9144, 0.0),
    (Quantity::Length, "mile", &["miles", "mi"], 1609.344, 0.0),
    (Quantity::Length, "nautical_mile", &["nautical_miles", "nmi"], 1852.0, 0.0),
    (Quantity::Length, "astronomical_unit", &["astronomical_units", "au"], 1.495978707e11, 0.0),
    (Quantity::Length, "lightyear", &["lightyears", "ly"], 9.4607304725808e15, 0.0),

    (Quantity::Mass, "kilogram", &["kilograms", "kg"], 1.0, 0.0),
    (Quantity::Mass, "gram", &["grams", "g"], 1e-3, 0.0),
    (Quantity::Mass, "milligram", &["milligrams", "mg"], 1e-6, 0.0),
    (Quantity::Mass, "tonne", &["tonnes", "t"], 1e3, 0.0),
    (Quantity::Mass, "pound", &["pounds", "lb", "lbs"], 0.45359237, 0.0),
    (Quantity::Mass, "ounce", &["ounces", "oz"], 0.028349523125, 0.0),
    (Quantity::Mass, "stone", &["stones", "st"], 6.35029318, 0.0),
    (Quantity::Mass, "dalton", &["daltons", "Da"], 1.66053906660e-27, 0.0),

    (Quantity::Time, "second", &["seconds", "sec", "s"], 1.0, 0.0),
    (Quantity::Time, "millisecond", &["milliseconds", "ms"], 1e-3, 0.0),
    (Quantity::Time, "microsecond", &["microseconds", "us"], 1e-6, 0.0),
    (Quantity::Time, "minute", &["minutes", "min"], 60.0, 0.0),
    (Quantity::Time, "hour", &["hours", "hr", "h"], 3600.0, 0.0),
    (Quantity::Time, "day", &["days", "d"], 86400.0, 0.0),
    // julian year
    (Quantity::Time, "year", &["years", "yr"], 31557600.0, 0.0),

    (Quantity::Temperature, "kelvin", &["kelvins", "K"], 1.0, 0.0),
    (Quantity::Temperature, "celsius", &["degC"], 1.0, 273.15),
    (Quantity::Temperature, "fahrenheit", &["degF"], 5.0 / 9.0, 459.67 * 5.0 / 9.0),

    (Quantity::Volume, "liter", &["liters", "litre", "litres", "l", "L"], 1.0, 0.0),
    (Quantity::Volume, "milliliter", &["milliliters", "millilitre", "millilitres", "ml", "mL"], 1e-3, 0.0),
    (Quantity::Volume, "cubic_meter", &["cubic_meters", "m3"], 1e3, 0.0),
    (Quantity::Volume, "gallon", &["gallons", "gal"], 3.785411784, 0.0),
    (Quantity::Volume, "pint", &["pints", "pt"], 0.473176473, 0.0),
    (Quantity::Volume, "cup", &["cups"], 0.2365882365, 0.0),

    (Quantity::Area, "square_meter", &["square_meters", "m2"], 1.0, 0.0),
    (Quantity::Area, "square_kilometer", &["square_kilometers", "km2"], 1e6, 0.0),
    (Quantity::Area, "square_foot", &["square_feet", "ft2"], 0.09290304, 0.0),
    (Quantity::Area, "hectare", &["hectares", "ha"], 1e4, 0.0),
    (Quantity::Area, "acre", &["acres", "ac"], 4046.8564224, 0.0),

    (Quantity::Speed, "meters_per_second", &["mps"], 1.0, 0.0),
    (Quantity::Speed, "kilometers_per_hour", &["kph", "kmh"], 1e3 / 3600.0, 0.0),
    (Quantity::Speed, "miles_per_hour", &["mph"], 0.44704, 0.0),
    (Quantity::Speed, "knot", &["knots", "kn"], 1852.0 / 3600.0, 0.0),

    (Quantity::Energy, "joule", &["joules", "J"], 1.0, 0.0),
    (Quantity::Energy, "kilojoule", &["kilojoules", "kJ"], 1e3, 0.0),
    (Quantity::Energy, "calorie", &["calories", "cal"], 4.184, 0.0),
    (Quantity::Energy, "kilocalorie", &["kilocalories", "kcal"], 4184.0, 0.0),
    (Quantity::Energy, "kilowatt_hour", &["kilowatt_hours", "kWh"], 3.6e6, 0.0),
    (Quantity::Energy, "electronvolt", &["electronvolts", "eV"], 1.602176634e-19, 0.0),

    (Quantity::Pressure, "pascal", &["pascals", "Pa"], 1.0, 0.0),
    (Quantity::Pressure, "kilopascal", &["kilopascals", "kPa"], 1e3, 0.0),
    (Quantity::Pressure, "bar", &["bars"], 1e5, 0.0),
    (Quantity::Pressure, "atmosphere", &["atmospheres", "atm"], 101325.0, 0.0),
    (Quantity::Pressure, "psi", &[], 6894.757293168, 0.0),
];

#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: Vec<UnitDescriptor>,
    index: HashMap<String, usize>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in unit and the units added by
    /// [`define_units`].
    pub fn standard() -> Result<Self, ConversionError> {
        let mut registry = Self::new();

        for (quantity, name, aliases, ratio, offset) in STANDARD_UNITS {
            registry.register(
                UnitDescriptor::new(name, *quantity, *ratio)
                    .with_aliases(aliases)
                    .with_offset(*offset)
            )?;
        }

        define_units(&mut registry)?;

        Ok(registry)
    }

    pub fn register(&mut self, unit: UnitDescriptor) -> Result<(), ConversionError> {
        if !unit.ratio.is_finite() || unit.ratio == 0.0 || !unit.offset.is_finite() {
            return Err(ConversionError::InvalidRatio { unit: unit.name });
        }

        if let Some(name) = unit.names().find(|name| self.index.contains_key(*name)) {
            return Err(ConversionError::DuplicateUnit { name: name.to_string() });
        }

        let id = self.units.len();

        for name in unit.names() {
            self.index.insert(name.to_string(), id);
        }

        log::trace!("registered unit `{}` ({})", unit.name, unit.quantity);
        self.units.push(unit);

        Ok(())
    }

    /// Registers `name` as `ratio` times the already known unit `base`.
    pub fn register_ratio(
        &mut self,
        name: &str,
        aliases: &[&str],
        ratio: f64,
        base: &str
    ) -> Result<(), ConversionError> {
        let base = self.find(base)?;

        let unit = UnitDescriptor::new(name, base.quantity, ratio * base.ratio)
            .with_aliases(aliases)
            .with_offset(base.offset);

        self.register(unit)
    }

    /// Finds a unit by name, plural or symbol. Full names also match
    /// regardless of case.
    pub fn find(&self, name: &str) -> Result<&UnitDescriptor, ConversionError> {
        self.index.get(name)
            .or_else(|| self.index.get(&name.to_lowercase()))
            .map(|id| &self.units[*id])
            .ok_or_else(|| ConversionError::UnknownUnit { unit: name.to_string() })
    }

    /// Registered units in registration order.
    pub fn units(&self) -> impl Iterator<Item = &UnitDescriptor> {
        self.units.iter()
    }

    /// Converts `magnitude` from one unit to another of the same quantity.
    /// Converting a unit to itself never consults the registry.
    pub fn convert(&self, magnitude: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        if from == to {
            return Ok(magnitude);
        }

        let source = self.find(from)?;
        let target = self.find(to)?;

        if source.quantity != target.quantity {
            return Err(ConversionError::IncompatibleUnits {
                from: from.to_string(),
                from_quantity: source.quantity,
                to: to.to_string(),
                to_quantity: target.quantity,
            });
        }

        Ok(target.from_base(source.to_base(magnitude)))
    }
}

/// Extension hook for units derived from the built-in ones.
pub fn define_units(registry: &mut UnitRegistry) -> Result<(), ConversionError> {
    registry.register_ratio("week", &["weeks", "wk"], 7.0, "day")?;
    registry.register_ratio("fortnight", &["fortnights"], 14.0, "day")?;

    Ok(())
}
