//! Fixed-width two-line orbital element records.
//!
//! Column layout (1-based, both lines end with a mod-10 checksum in column 69):
//!
//! ```text
//! 1 NNNNNC DDDDDDDD YYDDD.DDDDDDDD +.NNNNNNNN +NNNNN-N +NNNNN-N N NNNN
//! 2 NNNNN III.IIII RRR.RRRR EEEEEEE PPP.PPPP MMM.MMMM NN.NNNNNNNNRRRRR
//! ```

use std::fmt;

use log::debug;

use crate::error::{GeoError, Result};

pub const LINE_LENGTH: usize = 69;
const CATALOG_ID_WIDTH: usize = 5;
const DESIGNATOR_WIDTH: usize = 8;
// Absorbs binary representation error before truncating (0.29 * 100 = 28.999...)
const TRUNCATION_EPSILON: f64 = 1e-6;

/// One magnitude bracket of a fixed-point column: values at or above `lower`
/// (and below the previous bracket) are written as `leading_zeros` zeros
/// followed by `significant` characters of the number itself.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    lower: f64,
    leading_zeros: usize,
    significant: usize,
}

/// Fixed-point column: brackets ordered from the largest lower bound down.
#[derive(Debug)]
struct FieldLayout {
    field: &'static str,
    brackets: &'static [Bracket],
    limit: f64,
}

const fn bracket(lower: f64, leading_zeros: usize, significant: usize) -> Bracket {
    Bracket {
        lower,
        leading_zeros,
        significant,
    }
}

const ANGLE_BRACKETS: [Bracket; 3] = [
    bracket(100.0, 0, 8),
    bracket(10.0, 1, 7),
    bracket(0.0, 2, 6),
];

const MEAN_MOTION_BRACKETS: [Bracket; 2] = [bracket(10.0, 0, 11), bracket(0.0, 1, 10)];

const EPOCH_DAY_BRACKETS: [Bracket; 3] = [
    bracket(100.0, 0, 12),
    bracket(10.0, 1, 11),
    bracket(0.0, 2, 10),
];

const INCLINATION: FieldLayout = angle_layout("inclination");
const RAAN: FieldLayout = angle_layout("right ascension");
const ARG_PERIGEE: FieldLayout = angle_layout("argument of perigee");
const MEAN_ANOMALY: FieldLayout = angle_layout("mean anomaly");

const MEAN_MOTION: FieldLayout = FieldLayout {
    field: "mean motion",
    brackets: &MEAN_MOTION_BRACKETS,
    limit: 100.0,
};

const EPOCH_DAY: FieldLayout = FieldLayout {
    field: "epoch day",
    brackets: &EPOCH_DAY_BRACKETS,
    limit: 1000.0,
};

const fn angle_layout(field: &'static str) -> FieldLayout {
    FieldLayout {
        field,
        brackets: &ANGLE_BRACKETS,
        limit: 1000.0,
    }
}

fn integer_digits(lower: f64) -> usize {
    let mut digits = 1;
    let mut bound = 10.0;
    while lower >= bound {
        digits += 1;
        bound *= 10.0;
    }
    digits
}

/// Truncates `value` to `decimals` places and returns it scaled to an integer.
/// The epsilon absorbs representation error but never carries into the integer part.
fn truncate_scaled(value: f64, decimals: usize) -> u64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    let nudged = (scaled + TRUNCATION_EPSILON).floor();
    if (nudged / factor).floor() == value.trunc() {
        nudged as u64
    } else {
        scaled.floor() as u64
    }
}

impl FieldLayout {
    fn bracket_for(&self, value: f64) -> &Bracket {
        self.brackets
            .iter()
            .find(|b| value >= b.lower)
            .unwrap_or(&self.brackets[self.brackets.len() - 1])
    }

    fn width(&self) -> usize {
        let b = &self.brackets[0];
        b.leading_zeros + b.significant
    }

    fn format(&self, value: f64) -> Result<String> {
        if !value.is_finite() || value < 0.0 {
            return Err(GeoError::format(
                self.field,
                format!("{} cannot be written as an unsigned fixed-point column", value),
            ));
        }
        if value >= self.limit {
            return Err(GeoError::format(
                self.field,
                format!("{} overflows {} columns", value, self.width()),
            ));
        }

        let first = self.bracket_for(value);
        let decimals = first.significant - integer_digits(first.lower) - 1;
        let scale = 10u64.pow(decimals as u32);
        let scaled = truncate_scaled(value, decimals);
        let integer = scaled / scale;
        let fraction = scaled % scale;

        if integer as f64 >= self.limit {
            return Err(GeoError::format(
                self.field,
                format!("{} overflows {} columns", value, self.width()),
            ));
        }

        // a value a hair below a power of ten can carry into the next bracket
        let b = self.bracket_for(integer as f64);
        let int_digits = integer_digits(b.lower);
        let text = format!(
            "{}{:0int_width$}.{:0dec_width$}",
            "0".repeat(b.leading_zeros),
            integer,
            fraction,
            int_width = int_digits,
            dec_width = b.significant - int_digits - 1,
        );
        debug_assert_eq!(text.len(), self.width());
        Ok(text)
    }
}

/// Orbital elements and bookkeeping fields of one two-line record.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalElementSet {
    pub catalog_id: String,
    pub classification: char,
    pub international_designator: Option<String>,
    pub epoch_year: u8,
    pub epoch_day: f64,
    pub mean_motion: f64, // rev/day
    pub mean_motion_dot: f64,
    pub mean_motion_ddot: f64,
    pub drag_term: f64,
    pub ephemeris_type: u8,
    pub element_set_number: u16,
    pub eccentricity: f64,
    pub inclination: f64,  // degrees
    pub raan: f64,         // degrees
    pub arg_perigee: f64,  // degrees
    pub mean_anomaly: f64, // degrees
    pub revolution_number: u32,
}

impl OrbitalElementSet {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog_id: &str,
        epoch_year: u8,
        epoch_day: f64,
        mean_motion: f64,
        eccentricity: f64,
        inclination: f64,
        arg_perigee: f64,
        raan: f64,
        revolution_number: u32,
    ) -> Self {
        Self {
            catalog_id: catalog_id.to_string(),
            classification: 'U',
            international_designator: None,
            epoch_year,
            epoch_day,
            mean_motion,
            mean_motion_dot: 0.0,
            mean_motion_ddot: 0.0,
            drag_term: 0.0,
            ephemeris_type: 0,
            element_set_number: 0,
            eccentricity,
            inclination,
            raan,
            arg_perigee,
            mean_anomaly: 0.0,
            revolution_number,
        }
    }

    fn validate(&self) -> Result<()> {
        check_range("eccentricity", self.eccentricity, 0.0, 1.0, false)?;
        check_range("inclination", self.inclination, 0.0, 180.0, true)?;
        check_range("right ascension", self.raan, 0.0, 360.0, false)?;
        check_range("argument of perigee", self.arg_perigee, 0.0, 360.0, false)?;
        check_range("mean anomaly", self.mean_anomaly, 0.0, 360.0, false)?;
        check_range("epoch day", self.epoch_day, 1.0, 367.0, false)?;
        if self.epoch_year > 99 {
            return Err(GeoError::range(
                "epoch year",
                self.epoch_year as f64,
                "must be a two-digit year",
            ));
        }
        if !self.mean_motion.is_finite() || self.mean_motion <= 0.0 {
            return Err(GeoError::range(
                "mean motion",
                self.mean_motion,
                "must be positive",
            ));
        }
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64, inclusive: bool) -> Result<()> {
    let ok = value.is_finite()
        && value >= min
        && if inclusive { value <= max } else { value < max };
    if ok {
        Ok(())
    } else if inclusive {
        Err(GeoError::range(field, value, "outside the closed valid interval"))
    } else {
        Err(GeoError::range(field, value, "outside the half-open valid interval"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRecord {
    pub line1: String,
    pub line2: String,
}

impl EncodedRecord {
    pub fn verify(&self) -> Result<()> {
        verify_line(&self.line1, 1)?;
        verify_line(&self.line2, 2)
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_ok()
    }

    pub fn decode(&self) -> Result<OrbitalElementSet> {
        decode(&self.line1, &self.line2)
    }
}

impl fmt::Display for EncodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.line1, self.line2)
    }
}

/// Mod-10 sum: digits count their value, '-' counts 1, everything else 0.
pub fn checksum(text: &str) -> u8 {
    let sum: u32 = text
        .bytes()
        .map(|b| match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

/// Recomputes the checksum over everything but the last column and compares.
pub fn verify_line(line: &str, line_number: u8) -> Result<()> {
    if !line.is_ascii() || line.len() != LINE_LENGTH {
        return Err(GeoError::format(
            "record line",
            format!(
                "line {} must be {} ASCII characters, got {}",
                line_number,
                LINE_LENGTH,
                line.chars().count()
            ),
        ));
    }
    let (body, last) = line.split_at(LINE_LENGTH - 1);
    let expected = checksum(body);
    let found = last.chars().next().unwrap_or(' ');
    if found.to_digit(10) != Some(expected as u32) {
        return Err(GeoError::Checksum {
            line: line_number,
            expected,
            found,
        });
    }
    Ok(())
}

fn with_checksum(mut body: String) -> String {
    let sum = checksum(&body);
    body.push(char::from(b'0' + sum));
    body
}

fn format_catalog_id(id: &str) -> Result<String> {
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(GeoError::format(
            "catalog id",
            format!("{:?} must be 1-5 ASCII letters or digits", id),
        ));
    }
    if id.len() > CATALOG_ID_WIDTH {
        return Err(GeoError::format(
            "catalog id",
            format!("{:?} is longer than {} characters", id, CATALOG_ID_WIDTH),
        ));
    }
    Ok(format!("{:0>width$}", id, width = CATALOG_ID_WIDTH))
}

fn format_designator(designator: Option<&str>) -> Result<String> {
    let designator = designator.unwrap_or("");
    if designator.len() > DESIGNATOR_WIDTH || !designator.chars().all(|c| c.is_ascii_graphic()) {
        return Err(GeoError::format(
            "international designator",
            format!("{:?} must be at most {} printable characters", designator, DESIGNATOR_WIDTH),
        ));
    }
    Ok(format!("{:<width$}", designator, width = DESIGNATOR_WIDTH))
}

/// Eccentricity with the leading "0." dropped, truncated to seven digits.
fn format_eccentricity(e: f64) -> String {
    format!("{:07}", truncate_scaled(e, 7).min(9_999_999))
}

/// First derivative of mean motion: sign, then ".NNNNNNNN".
fn format_mean_motion_dot(value: f64) -> Result<String> {
    if !value.is_finite() || value.abs() >= 1.0 {
        return Err(GeoError::format(
            "mean motion derivative",
            format!("{} does not fit \"+.NNNNNNNN\"", value),
        ));
    }
    let sign = if value < 0.0 { '-' } else { ' ' };
    let digits = truncate_scaled(value.abs(), 8).min(99_999_999);
    Ok(format!("{}.{:08}", sign, digits))
}

/// Assumed-decimal exponent notation: " 31049-3" is +0.31049e-3.
fn format_exponent(field: &'static str, value: f64) -> Result<String> {
    if !value.is_finite() {
        return Err(GeoError::format(field, format!("{} is not finite", value)));
    }
    let sign = if value < 0.0 { '-' } else { ' ' };
    let magnitude = value.abs();
    if magnitude == 0.0 {
        return Ok(" 00000-0".to_string());
    }

    let mut exponent = magnitude.log10().floor() as i32 + 1;
    let mut mantissa = truncate_scaled(magnitude / 10f64.powi(exponent), 5);
    if mantissa >= 100_000 {
        mantissa /= 10;
        exponent += 1;
    } else if mantissa < 10_000 {
        // log10 landed one short of the true exponent
        mantissa = truncate_scaled(magnitude / 10f64.powi(exponent - 1), 5).min(99_999);
        exponent -= 1;
    }

    if exponent > 9 {
        return Err(GeoError::format(
            field,
            format!("{} exceeds the exponent range of the column", value),
        ));
    }
    if exponent < -9 {
        debug!("{} {} below column resolution, written as zero", field, value);
        return Ok(" 00000-0".to_string());
    }

    let exp_sign = if exponent < 0 { '-' } else { '+' };
    Ok(format!("{}{:05}{}{}", sign, mantissa, exp_sign, exponent.abs()))
}

pub fn encode(elements: &OrbitalElementSet) -> Result<EncodedRecord> {
    elements.validate()?;

    let id = format_catalog_id(&elements.catalog_id)?;
    if !elements.classification.is_ascii_uppercase() {
        return Err(GeoError::format(
            "classification",
            format!("{:?} must be an uppercase letter", elements.classification),
        ));
    }
    if elements.ephemeris_type > 9 {
        return Err(GeoError::format("ephemeris type", "must be a single digit"));
    }
    if elements.element_set_number > 9999 {
        return Err(GeoError::format(
            "element set number",
            format!("{} overflows 4 columns", elements.element_set_number),
        ));
    }
    if elements.revolution_number > 99_999 {
        return Err(GeoError::format(
            "revolution number",
            format!("{} overflows 5 columns", elements.revolution_number),
        ));
    }

    let line1 = format!(
        "1 {}{} {} {:02}{} {} {} {} {} {:>4}",
        id,
        elements.classification,
        format_designator(elements.international_designator.as_deref())?,
        elements.epoch_year,
        EPOCH_DAY.format(elements.epoch_day)?,
        format_mean_motion_dot(elements.mean_motion_dot)?,
        format_exponent("mean motion second derivative", elements.mean_motion_ddot)?,
        format_exponent("drag term", elements.drag_term)?,
        elements.ephemeris_type,
        elements.element_set_number,
    );

    let line2 = format!(
        "2 {} {} {} {} {} {} {}{:>5}",
        id,
        INCLINATION.format(elements.inclination)?,
        RAAN.format(elements.raan)?,
        format_eccentricity(elements.eccentricity),
        ARG_PERIGEE.format(elements.arg_perigee)?,
        MEAN_ANOMALY.format(elements.mean_anomaly)?,
        MEAN_MOTION.format(elements.mean_motion)?,
        elements.revolution_number,
    );

    Ok(EncodedRecord {
        line1: with_checksum(line1),
        line2: with_checksum(line2),
    })
}

fn column<'a>(line: &'a str, start: usize, end: usize) -> &'a str {
    // 1-based inclusive columns; lines are checked to be 69 ASCII bytes
    &line[start - 1..end]
}

fn parse_number<T: std::str::FromStr>(field: &'static str, text: &str) -> Result<T> {
    text.trim()
        .parse()
        .map_err(|_| GeoError::format(field, format!("cannot parse {:?}", text)))
}

fn parse_exponent(field: &'static str, text: &str) -> Result<f64> {
    let text = text.trim();
    if text.len() < 3 {
        return Err(GeoError::format(field, format!("cannot parse {:?}", text)));
    }
    let (mantissa, exponent) = text.split_at(text.len() - 2);
    let mantissa: f64 = parse_number(field, &format!("0.{}", mantissa.trim_start_matches(['+', '-'])))?;
    let exponent: i32 = parse_number(field, exponent)?;
    let sign = if text.starts_with('-') { -1.0 } else { 1.0 };
    Ok(sign * mantissa * 10f64.powi(exponent))
}

/// Parses a record back into its elements after verifying both checksums.
pub fn decode(line1: &str, line2: &str) -> Result<OrbitalElementSet> {
    verify_line(line1, 1)?;
    verify_line(line2, 2)?;
    if !line1.starts_with("1 ") || !line2.starts_with("2 ") {
        return Err(GeoError::format("record line", "lines must start with \"1 \" and \"2 \""));
    }

    let id = column(line1, 3, 7);
    if id != column(line2, 3, 7) {
        return Err(GeoError::format(
            "catalog id",
            format!("line 1 has {:?}, line 2 has {:?}", id, column(line2, 3, 7)),
        ));
    }
    let designator = column(line1, 10, 17).trim();
    let mean_motion_dot = column(line1, 34, 43).trim().replacen(".", "0.", 1);

    Ok(OrbitalElementSet {
        catalog_id: id.to_string(),
        classification: column(line1, 8, 8).chars().next().unwrap_or('U'),
        international_designator: (!designator.is_empty()).then(|| designator.to_string()),
        epoch_year: parse_number("epoch year", column(line1, 19, 20))?,
        epoch_day: parse_number("epoch day", column(line1, 21, 32))?,
        mean_motion_dot: parse_number("mean motion derivative", &mean_motion_dot)?,
        mean_motion_ddot: parse_exponent("mean motion second derivative", column(line1, 45, 52))?,
        drag_term: parse_exponent("drag term", column(line1, 54, 61))?,
        ephemeris_type: parse_number("ephemeris type", column(line1, 63, 63))?,
        element_set_number: parse_number("element set number", column(line1, 65, 68))?,
        inclination: parse_number("inclination", column(line2, 9, 16))?,
        raan: parse_number("right ascension", column(line2, 18, 25))?,
        eccentricity: parse_number("eccentricity", &format!("0.{}", column(line2, 27, 33)))?,
        arg_perigee: parse_number("argument of perigee", column(line2, 35, 42))?,
        mean_anomaly: parse_number("mean anomaly", column(line2, 44, 51))?,
        mean_motion: parse_number("mean motion", column(line2, 53, 63))?,
        revolution_number: parse_number("revolution number", column(line2, 64, 68))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn iss() -> OrbitalElementSet {
        let mut set = OrbitalElementSet::new(
            "25544", 24, 1.5, 15.49, 0.0001218, 51.64, 88.9267, 297.859, 43210,
        );
        set.international_designator = Some("98067A".to_string());
        set.mean_anomaly = 338.131;
        set.drag_term = 0.00031049;
        set.element_set_number = 999;
        set
    }

    #[test]
    fn test_iss_columns() {
        let record = encode(&iss()).unwrap();
        assert_eq!(
            record.line1,
            "1 25544U 98067A   24001.50000000  .00000000  00000-0  31049-3 0  9992"
        );
        assert_eq!(
            record.line2,
            "2 25544 051.6400 297.8590 0001218 088.9267 338.1310 15.49000000432108"
        );
        assert_eq!(record.line1.len(), LINE_LENGTH);
        assert_eq!(record.line2.len(), LINE_LENGTH);
        assert!(record.is_valid());
    }

    #[test]
    fn test_identifier_padding() {
        let set = OrbitalElementSet::new("7", 25, 100.25, 15.0, 0.001, 97.41997, 10.0, 200.0, 1);
        let record = encode(&set).unwrap();
        assert_eq!(&record.line1[2..7], "00007");
        assert_eq!(&record.line2[2..7], "00007");
    }

    #[test]
    fn test_identifier_too_long() {
        let set = OrbitalElementSet::new("123456", 25, 100.25, 15.0, 0.001, 97.0, 10.0, 200.0, 1);
        assert!(matches!(
            encode(&set),
            Err(GeoError::Format { field: "catalog id", .. })
        ));
    }

    #[test]
    fn test_angle_brackets() {
        assert_eq!(INCLINATION.format(97.41997).unwrap(), "097.4199");
        assert_eq!(INCLINATION.format(5.5).unwrap(), "005.5000");
        assert_eq!(INCLINATION.format(0.0).unwrap(), "000.0000");
        assert_eq!(RAAN.format(125.1906).unwrap(), "125.1906");
        assert_eq!(RAAN.format(10.0).unwrap(), "010.0000");
        assert_eq!(RAAN.format(359.99999).unwrap(), "359.9999");
        // truncation must not round into the integer part
        assert_eq!(ARG_PERIGEE.format(9.99999).unwrap(), "009.9999");
        assert_eq!(ARG_PERIGEE.format(0.29).unwrap(), "000.2900");
        assert_eq!(ARG_PERIGEE.format(9.9999999999).unwrap(), "009.9999");
        assert_eq!(MEAN_ANOMALY.format(359.99999999999).unwrap(), "359.9999");
        assert_eq!(MEAN_MOTION.format(9.999999999999).unwrap(), "09.99999999");
        assert!(RAAN.format(1000.0).is_err());
        assert!(RAAN.format(-1.0).is_err());
    }

    #[test]
    fn test_values_just_below_a_boundary_keep_their_integer_part() {
        let mut set = OrbitalElementSet::new(
            "7", 25, 84.0, 15.0, 0.001, 9.9999999999, 10.0, 200.0, 0,
        );
        set.mean_anomaly = 359.99999999999;
        let record = encode(&set).unwrap();
        assert_eq!(&record.line2[8..16], "009.9999");
        assert_eq!(&record.line2[43..51], "359.9999");
        assert!(record.is_valid());
    }

    #[test]
    fn test_mean_motion_brackets() {
        assert_eq!(MEAN_MOTION.format(15.72125391).unwrap(), "15.72125391");
        assert_eq!(MEAN_MOTION.format(1.00273791).unwrap(), "01.00273791");
        assert!(matches!(
            MEAN_MOTION.format(100.0),
            Err(GeoError::Format { .. })
        ));
    }

    #[test]
    fn test_eccentricity_digits() {
        assert_eq!(format_eccentricity(0.00145295), "0014529");
        assert_eq!(format_eccentricity(0.0), "0000000");
        assert_eq!(format_eccentricity(0.7), "7000000");
        assert_eq!(format_eccentricity(0.999999999999), "9999999");
    }

    #[test]
    fn test_exponent_fields() {
        assert_eq!(format_exponent("drag term", 0.00031049).unwrap(), " 31049-3");
        assert_eq!(format_exponent("drag term", -0.000011606).unwrap(), "-11606-4");
        assert_eq!(format_exponent("drag term", 0.0).unwrap(), " 00000-0");
        assert_eq!(format_exponent("drag term", 0.5).unwrap(), " 50000+0");
        assert_eq!(format_exponent("drag term", 1e-12).unwrap(), " 00000-0");
        assert!(format_exponent("drag term", 1e12).is_err());
    }

    #[test]
    fn test_mean_motion_dot_field() {
        assert_eq!(format_mean_motion_dot(0.0).unwrap(), " .00000000");
        assert_eq!(format_mean_motion_dot(-0.00002182).unwrap(), "-.00002182");
        assert!(format_mean_motion_dot(1.5).is_err());
    }

    #[test]
    fn test_checksum_rule() {
        assert_eq!(checksum("1 25544U"), (1 + 2 + 5 + 5 + 4 + 4) % 10);
        assert_eq!(checksum("-.+ AZ"), 1);
        assert_eq!(checksum(""), 0);
    }

    #[test]
    fn test_single_digit_flip_breaks_checksum() {
        let record = encode(&iss()).unwrap();
        for (line_number, line) in [(1u8, &record.line1), (2u8, &record.line2)] {
            for (i, c) in line.char_indices() {
                let Some(d) = c.to_digit(10) else { continue };
                let mut corrupted = line.clone();
                let replacement = char::from_digit((d + 1) % 10, 10).unwrap();
                corrupted.replace_range(i..i + 1, &replacement.to_string());
                assert!(
                    verify_line(&corrupted, line_number).is_err(),
                    "flip at column {} went unnoticed",
                    i + 1
                );
            }
        }
    }

    #[test]
    fn test_verify_rejects_wrong_length() {
        assert!(matches!(
            verify_line("1 00007U", 1),
            Err(GeoError::Format { .. })
        ));
    }

    #[test]
    fn test_range_errors() {
        let mut set = iss();
        set.eccentricity = 1.0;
        assert!(matches!(
            encode(&set),
            Err(GeoError::InputRange { field: "eccentricity", .. })
        ));

        let mut set = iss();
        set.inclination = 180.5;
        assert!(matches!(encode(&set), Err(GeoError::InputRange { .. })));

        let mut set = iss();
        set.epoch_year = 124;
        assert!(encode(&set).is_err());

        let mut set = iss();
        set.revolution_number = 100_000;
        assert!(matches!(encode(&set), Err(GeoError::Format { .. })));
    }

    #[test]
    fn test_decode_recovers_elements() {
        let original = iss();
        let decoded = encode(&original).unwrap().decode().unwrap();

        assert_eq!(decoded.catalog_id, "25544");
        assert_eq!(decoded.international_designator.as_deref(), Some("98067A"));
        assert_eq!(decoded.epoch_year, 24);
        assert_eq!(decoded.revolution_number, 43210);
        assert_eq!(decoded.element_set_number, 999);
        assert_abs_diff_eq!(decoded.epoch_day, 1.5);
        assert_abs_diff_eq!(decoded.inclination, 51.64);
        assert_abs_diff_eq!(decoded.raan, 297.859);
        assert_abs_diff_eq!(decoded.eccentricity, 0.0001218, epsilon = 1e-12);
        assert_abs_diff_eq!(decoded.arg_perigee, 88.9267);
        assert_abs_diff_eq!(decoded.mean_anomaly, 338.131);
        assert_abs_diff_eq!(decoded.mean_motion, 15.49);
        assert_abs_diff_eq!(decoded.drag_term, 0.00031049, epsilon = 1e-12);
        assert_abs_diff_eq!(decoded.mean_motion_dot, 0.0);
    }

    #[test]
    fn test_decode_detects_corruption() {
        let record = encode(&iss()).unwrap();
        let mut line2 = record.line2.clone();
        line2.replace_range(9..10, "6");
        assert!(matches!(
            decode(&record.line1, &line2),
            Err(GeoError::Checksum { line: 2, .. })
        ));
    }

    #[test]
    fn test_accepted_by_sgp4_parser() {
        let record = encode(&iss()).unwrap();
        let elements = sgp4::Elements::from_tle(
            Some("ISS (ZARYA)".to_string()),
            record.line1.as_bytes(),
            record.line2.as_bytes(),
        )
        .unwrap();

        assert_eq!(elements.norad_id, 25544);
        assert_abs_diff_eq!(elements.inclination, 51.64, epsilon = 1e-9);
        assert_abs_diff_eq!(elements.eccentricity, 0.0001218, epsilon = 1e-12);
        assert_abs_diff_eq!(elements.mean_motion, 15.49, epsilon = 1e-9);
        assert_eq!(elements.revolution_number, 43210);
    }
}
