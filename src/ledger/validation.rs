use std::collections::HashSet;

use super::types::Ledger;

/// Validate a ledger after loading.
/// Returns all validation errors at once (not just the first).
pub fn validate_ledger(ledger: &Ledger) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut golfer_ids = HashSet::new();
    let mut emails = HashSet::new();
    for (i, golfer) in ledger.golfers.iter().enumerate() {
        if !golfer_ids.insert(golfer.id) {
            errors.push(format!("golfers[{}].id: duplicate id {}", i, golfer.id));
        }
        if golfer.name.trim().is_empty() {
            errors.push(format!("golfers[{}].name: must not be empty", i));
        }
        if let Some(ref email) = golfer.email {
            if !emails.insert(email.to_lowercase()) {
                errors.push(format!("golfers[{}].email: '{}' is already in use", i, email));
            }
        }
    }

    let mut course_ids = HashSet::new();
    for (i, course) in ledger.courses.iter().enumerate() {
        if !course_ids.insert(course.id) {
            errors.push(format!("courses[{}].id: duplicate id {}", i, course.id));
        }
        if course.name.trim().is_empty() {
            errors.push(format!("courses[{}].name: must not be empty", i));
        }
        if course.par <= 0 {
            errors.push(format!(
                "courses[{}].par: must be positive (got {})",
                i, course.par
            ));
        }
        if !course.course_rating.is_finite() {
            errors.push(format!(
                "courses[{}].course_rating: must be a number (got {})",
                i, course.course_rating
            ));
        }
        if course.slope_rating <= 0 {
            errors.push(format!(
                "courses[{}].slope_rating: must be positive (got {})",
                i, course.slope_rating
            ));
        }
    }

    for (i, score) in ledger.scores.iter().enumerate() {
        if !golfer_ids.contains(&score.golfer_id) {
            errors.push(format!(
                "scores[{}].golfer_id: unknown golfer {}",
                i, score.golfer_id
            ));
        }
        if !course_ids.contains(&score.course_id) {
            errors.push(format!(
                "scores[{}].course_id: unknown course {}",
                i, score.course_id
            ));
        }
        if score.gross_score <= 0 {
            errors.push(format!(
                "scores[{}].gross_score: must be positive (got {})",
                i, score.gross_score
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
