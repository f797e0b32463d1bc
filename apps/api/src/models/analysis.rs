//! Analysis data model: the structured report returned by the LLM for one resume.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity tier attached to a critical issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// Priority tier attached to an improvement item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A single blocking problem found in the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalIssue {
    pub issue: String,
    pub severity: Severity,
    pub recommendation: String,
}

/// A suggested improvement with its expected payoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub category: String,
    pub priority: Priority,
    pub issue: String,
    pub suggestion: String,
    pub impact: String,
}

/// ATS compatibility breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsAnalysis {
    /// 0-100.
    pub score: f64,
    pub issues: Vec<String>,
    pub keywords_found: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub formatting_issues: Vec<String>,
}

/// Writing-quality breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub action_verbs_count: u32,
    pub quantified_achievements: u32,
    pub suggestions: Vec<String>,
}

/// A role the candidate is a plausible match for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecommendation {
    pub title: String,
    /// 0-100.
    pub match_percentage: u32,
    pub skills_aligned: Vec<String>,
    pub skills_gap: Vec<String>,
    pub reason: String,
}

/// Skills extracted from the resume, grouped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsIdentified {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub tools: Vec<String>,
}

/// Full analysis record for one resume.
///
/// Produced once per upload, immutable after acceptance, replaced wholesale by
/// the next analysis. All scores are 0-100. Every field is required: a record
/// missing any of them does not deserialize and is treated as invalid wherever
/// candidate JSON is read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub overall_score: f64,
    pub ats_score: f64,
    pub content_quality_score: f64,
    pub formatting_score: f64,
    pub keyword_optimization_score: f64,
    pub impact_strength_score: f64,
    pub summary: String,
    pub critical_issues: Vec<CriticalIssue>,
    pub improvements: Vec<Improvement>,
    pub ats_analysis: AtsAnalysis,
    pub content_analysis: ContentAnalysis,
    pub job_recommendations: Vec<JobRecommendation>,
    pub skills_identified: SkillsIdentified,
}

impl ResumeAnalysis {
    /// Parses a serialized analysis record.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Parses an already-decoded JSON value into a typed record.
    pub fn from_json_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Minimal well-formedness gate: `overall_score` and `ats_score` must both be
/// present as numbers. A score of exactly 0 passes; only a missing or null
/// field (or a non-numeric stand-in) fails.
pub fn has_required_scores(value: &Value) -> bool {
    let is_score = |key: &str| value.get(key).map(Value::is_number).unwrap_or(false);
    is_score("overall_score") && is_score("ats_score")
}

/// Builds a fully-populated record for tests.
#[cfg(test)]
pub(crate) fn sample_analysis(overall_score: f64, ats_score: f64) -> ResumeAnalysis {
    ResumeAnalysis {
        overall_score,
        ats_score,
        content_quality_score: 80.0,
        formatting_score: 72.0,
        keyword_optimization_score: 65.0,
        impact_strength_score: 70.0,
        summary: "Solid resume with room to grow.".to_string(),
        critical_issues: vec![CriticalIssue {
            issue: "No contact details".to_string(),
            severity: Severity::Critical,
            recommendation: "Add an email address at the top".to_string(),
        }],
        improvements: vec![Improvement {
            category: "Impact".to_string(),
            priority: Priority::High,
            issue: "Bullets describe duties".to_string(),
            suggestion: "Lead with outcomes".to_string(),
            impact: "Reads as more senior".to_string(),
        }],
        ats_analysis: AtsAnalysis {
            score: ats_score,
            issues: vec!["Two-column layout".to_string()],
            keywords_found: vec!["Rust".to_string()],
            missing_keywords: vec!["Kubernetes".to_string()],
            formatting_issues: vec![],
        },
        content_analysis: ContentAnalysis {
            strengths: vec!["Clear progression".to_string()],
            weaknesses: vec!["Vague bullets".to_string()],
            action_verbs_count: 12,
            quantified_achievements: 3,
            suggestions: vec!["Quantify outcomes".to_string()],
        },
        job_recommendations: vec![JobRecommendation {
            title: "Backend Engineer".to_string(),
            match_percentage: 85,
            skills_aligned: vec!["Rust".to_string()],
            skills_gap: vec!["Kubernetes".to_string()],
            reason: "Stack overlap".to_string(),
        }],
        skills_identified: SkillsIdentified {
            technical: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            soft: vec!["Mentorship".to_string()],
            tools: vec!["Git".to_string()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// A complete record in the shape the model is instructed to return.
    pub(crate) const FULL_ANALYSIS: &str = r#"{
        "overall_score": 75,
        "ats_score": 68,
        "content_quality_score": 80,
        "formatting_score": 72,
        "keyword_optimization_score": 65,
        "impact_strength_score": 70,
        "summary": "Solid mid-level engineering resume held back by weak quantification.",
        "critical_issues": [
            {
                "issue": "No measurable outcomes in the last two roles",
                "severity": "high",
                "recommendation": "Add metrics to the top three bullets of each role"
            }
        ],
        "improvements": [
            {
                "category": "Impact",
                "priority": "high",
                "issue": "Bullets describe duties, not results",
                "suggestion": "Lead each bullet with the outcome",
                "impact": "Raises perceived seniority with recruiters"
            },
            {
                "category": "Keywords",
                "priority": "medium",
                "issue": "Missing common platform terms",
                "suggestion": "Work Kubernetes and Terraform into the skills section",
                "impact": "Improves ATS keyword matching"
            }
        ],
        "ats_analysis": {
            "score": 68,
            "issues": ["Two-column layout confuses older parsers"],
            "keywords_found": ["Rust", "PostgreSQL", "AWS"],
            "missing_keywords": ["Kubernetes", "Terraform"],
            "formatting_issues": ["Tables used for the skills grid"]
        },
        "content_analysis": {
            "strengths": ["Clear role progression", "Relevant stack"],
            "weaknesses": ["Few quantified achievements"],
            "action_verbs_count": 12,
            "quantified_achievements": 3,
            "suggestions": ["Quantify the migration project"]
        },
        "job_recommendations": [
            {
                "title": "Backend Engineer",
                "match_percentage": 85,
                "skills_aligned": ["Rust", "PostgreSQL"],
                "skills_gap": ["Kubernetes"],
                "reason": "Strong overlap with core backend stack"
            }
        ],
        "skills_identified": {
            "technical": ["Rust", "PostgreSQL", "AWS"],
            "soft": ["Mentorship"],
            "tools": ["Git", "Docker"]
        }
    }"#;

    #[test]
    fn test_full_analysis_deserializes() {
        let analysis = ResumeAnalysis::from_json_str(FULL_ANALYSIS).unwrap();
        assert!((analysis.overall_score - 75.0).abs() < f64::EPSILON);
        assert!((analysis.ats_score - 68.0).abs() < f64::EPSILON);
        assert_eq!(analysis.critical_issues.len(), 1);
        assert_eq!(analysis.critical_issues[0].severity, Severity::High);
        assert_eq!(analysis.improvements[1].priority, Priority::Medium);
        assert_eq!(analysis.content_analysis.action_verbs_count, 12);
        assert_eq!(analysis.job_recommendations[0].match_percentage, 85);
        assert_eq!(analysis.skills_identified.technical.len(), 3);
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let original = ResumeAnalysis::from_json_str(FULL_ANALYSIS).unwrap();
        let serialized = serde_json::to_string(&original).unwrap();
        let reparsed = ResumeAnalysis::from_json_str(&serialized).unwrap();
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_missing_field_is_rejected() {
        // Drop `summary` from an otherwise valid record.
        let mut value: Value = serde_json::from_str(FULL_ANALYSIS).unwrap();
        value.as_object_mut().unwrap().remove("summary");
        assert!(ResumeAnalysis::from_json_value(value).is_err());
    }

    #[test]
    fn test_empty_sequences_are_valid() {
        let mut value: Value = serde_json::from_str(FULL_ANALYSIS).unwrap();
        value["critical_issues"] = json!([]);
        value["job_recommendations"] = json!([]);
        value["skills_identified"]["soft"] = json!([]);
        let analysis = ResumeAnalysis::from_json_value(value).unwrap();
        assert!(analysis.critical_issues.is_empty());
        assert!(analysis.job_recommendations.is_empty());
    }

    #[test]
    fn test_severity_serde_lowercase() {
        let severity: Severity = serde_json::from_str(r#""critical""#).unwrap();
        assert_eq!(severity, Severity::Critical);
        assert_eq!(serde_json::to_string(&Severity::Low).unwrap(), r#""low""#);
    }

    #[test]
    fn test_priority_serde_lowercase() {
        let priority: Priority = serde_json::from_str(r#""high""#).unwrap();
        assert_eq!(priority, Priority::High);
        assert_eq!(
            serde_json::to_string(&Priority::Medium).unwrap(),
            r#""medium""#
        );
    }

    #[test]
    fn test_required_scores_present() {
        let value: Value = serde_json::from_str(FULL_ANALYSIS).unwrap();
        assert!(has_required_scores(&value));
    }

    #[test]
    fn test_required_scores_missing_overall() {
        let value = json!({"ats_score": 68});
        assert!(!has_required_scores(&value));
    }

    #[test]
    fn test_required_scores_null_ats() {
        let value = json!({"overall_score": 75, "ats_score": null});
        assert!(!has_required_scores(&value));
    }

    #[test]
    fn test_required_scores_zero_is_accepted() {
        // A genuine zero is a verdict, not an absence.
        let value = json!({"overall_score": 0, "ats_score": 0});
        assert!(has_required_scores(&value));
    }

    #[test]
    fn test_required_scores_non_numeric_rejected() {
        let value = json!({"overall_score": "75", "ats_score": 68});
        assert!(!has_required_scores(&value));
    }
}
