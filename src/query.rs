// src/query.rs

//! Inbound filter validation: every lookup needs gender, event and course.
//! The raw strings arrive from query params or CLI flags; upstream wants
//! single-letter codes.

use crate::config::consts::MAX_EVENT_LEN;
use crate::error::QueryError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Boys,
    Girls,
}

impl Gender {
    /// Accepts M/Male/Boys and F/Female/Girls in any casing.
    pub fn parse(s: &str) -> Result<Self, QueryError> {
        match s.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('M') | Some('B') => Ok(Gender::Boys),
            Some('F') | Some('G') => Ok(Gender::Girls),
            _ => Err(QueryError::Gender(s.to_string())),
        }
    }

    /// Upstream query code.
    pub fn code(self) -> &'static str {
        match self { Gender::Boys => "M", Gender::Girls => "F" }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Course {
    Scy, // short course yards
    Lcm, // long course meters
    Scm, // short course meters
}

impl Course {
    pub fn parse(s: &str) -> Result<Self, QueryError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SCY" | "Y" => Ok(Course::Scy),
            "LCM" | "L" => Ok(Course::Lcm),
            "SCM" | "S" => Ok(Course::Scm),
            _ => Err(QueryError::Course(s.to_string())),
        }
    }

    /// Upstream query code.
    pub fn code(self) -> &'static str {
        match self { Course::Scy => "Y", Course::Lcm => "L", Course::Scm => "S" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventQuery {
    pub gender: Gender,
    pub event: String,
    pub course: Course,
}

impl EventQuery {
    /// Build from optional raw params; `None`/blank fields are 400s.
    pub fn new(
        gender: Option<&str>,
        event: Option<&str>,
        course: Option<&str>,
    ) -> Result<Self, QueryError> {
        let gender = Gender::parse(required(gender, "gender")?)?;
        let course = Course::parse(required(course, "course")?)?;
        let event = required(event, "event")?.trim();
        if event.len() > MAX_EVENT_LEN {
            return Err(QueryError::EventTooLong(MAX_EVENT_LEN));
        }
        Ok(Self { gender, event: s!(event), course })
    }
}

fn required<'a>(v: Option<&'a str>, name: &'static str) -> Result<&'a str, QueryError> {
    match v {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(QueryError::Missing(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_aliases() {
        assert_eq!(Gender::parse("M").unwrap(), Gender::Boys);
        assert_eq!(Gender::parse("boys").unwrap(), Gender::Boys);
        assert_eq!(Gender::parse("Female").unwrap(), Gender::Girls);
        assert_eq!(Gender::parse("girls").unwrap(), Gender::Girls);
        assert!(Gender::parse("x").is_err());
        assert!(Gender::parse("").is_err());
    }

    #[test]
    fn course_aliases() {
        assert_eq!(Course::parse("scy").unwrap(), Course::Scy);
        assert_eq!(Course::parse("L").unwrap(), Course::Lcm);
        assert_eq!(Course::parse("SCM").unwrap(), Course::Scm);
        assert!(Course::parse("meters").is_err());
    }

    #[test]
    fn missing_params_name_the_field() {
        let err = EventQuery::new(None, Some("50 Free"), Some("SCY")).unwrap_err();
        assert_eq!(err, QueryError::Missing("gender"));
        let err = EventQuery::new(Some("M"), Some("  "), Some("SCY")).unwrap_err();
        assert_eq!(err, QueryError::Missing("event"));
    }

    #[test]
    fn event_is_trimmed_and_bounded() {
        let q = EventQuery::new(Some("M"), Some(" 50 Free "), Some("SCY")).unwrap();
        assert_eq!(q.event, "50 Free");
        let long = "x".repeat(MAX_EVENT_LEN + 1);
        assert!(EventQuery::new(Some("M"), Some(&long), Some("SCY")).is_err());
    }
}
