//! Offline reference-data validation.
//!
//! A prerequisite cycle makes every skill on the loop permanently
//! unpurchasable, and a dangling prerequisite name can never be satisfied.
//! Neither is checked at purchase time (the purchase path only looks one link
//! back), so admins run this after editing the skill table.

use std::collections::HashSet;
use std::sync::Arc;

use super::service::ReferenceDataService;

/// A single problem found in the skill table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFinding {
    pub skill: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }
}

pub struct ValidateReferenceData {
    reference: Arc<ReferenceDataService>,
}

impl ValidateReferenceData {
    pub fn new(reference: Arc<ReferenceDataService>) -> Self {
        Self { reference }
    }

    pub fn execute(&self) -> ValidationReport {
        let skills = self.reference.skills();
        let mut report = ValidationReport::default();

        for skill in &skills {
            let Some(prereq) = &skill.prerequisite else {
                continue;
            };

            if self.reference.skill_by_name(prereq).is_none() {
                report.findings.push(ValidationFinding {
                    skill: skill.name.clone(),
                    message: format!("prerequisite \"{prereq}\" does not exist"),
                });
                continue;
            }

            // Walk the chain from this skill; revisiting any name means the
            // chain loops back on itself.
            let mut visited = HashSet::new();
            visited.insert(skill.name.clone());
            let mut current = prereq.clone();
            loop {
                if !visited.insert(current.clone()) {
                    report.findings.push(ValidationFinding {
                        skill: skill.name.clone(),
                        message: format!("prerequisite chain loops through \"{current}\""),
                    });
                    break;
                }
                match self
                    .reference
                    .skill_by_name(&current)
                    .and_then(|s| s.prerequisite)
                {
                    Some(next) => current = next,
                    None => break,
                }
            }
        }

        if report.is_valid() {
            tracing::debug!(skills = skills.len(), "Reference data validated clean");
        } else {
            tracing::warn!(
                findings = report.findings.len(),
                "Reference data validation found problems"
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockArchetypeRepo, MockCultureRepo, MockHeritageRepo, MockSkillRepo,
    };
    use emberfall_domain::Skill;

    async fn validator_for(skills: Vec<Skill>) -> ValidateReferenceData {
        let mut heritage_repo = MockHeritageRepo::new();
        heritage_repo.expect_list().returning(|| Ok(vec![]));
        let mut culture_repo = MockCultureRepo::new();
        culture_repo.expect_list().returning(|| Ok(vec![]));
        let mut archetype_repo = MockArchetypeRepo::new();
        archetype_repo.expect_list().returning(|| Ok(vec![]));
        let mut skill_repo = MockSkillRepo::new();
        skill_repo.expect_list().returning(move || Ok(skills.clone()));

        let service = Arc::new(ReferenceDataService::new(
            Arc::new(heritage_repo),
            Arc::new(culture_repo),
            Arc::new(archetype_repo),
            Arc::new(skill_repo),
        ));
        service.reload().await.unwrap();
        ValidateReferenceData::new(service)
    }

    #[tokio::test]
    async fn when_chains_are_acyclic_report_is_clean() {
        let validator = validator_for(vec![
            Skill::new("First Aid"),
            Skill::new("Surgery").with_prerequisite("First Aid"),
            Skill::new("Field Medicine").with_prerequisite("Surgery"),
        ])
        .await;

        assert!(validator.execute().is_valid());
    }

    #[tokio::test]
    async fn when_prerequisite_is_missing_it_is_reported() {
        let validator =
            validator_for(vec![Skill::new("Surgery").with_prerequisite("First Aid")]).await;

        let report = validator.execute();
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].skill, "Surgery");
        assert!(report.findings[0].message.contains("does not exist"));
    }

    #[tokio::test]
    async fn when_chain_loops_every_member_is_reported() {
        let validator = validator_for(vec![
            Skill::new("Alpha").with_prerequisite("Beta"),
            Skill::new("Beta").with_prerequisite("Alpha"),
        ])
        .await;

        let report = validator.execute();
        assert_eq!(report.findings.len(), 2);
        assert!(report
            .findings
            .iter()
            .all(|f| f.message.contains("loops through")));
    }
}
