//! The authoritative in-memory reference-data cache.
//!
//! Heritages, cultures, archetypes, and skills are read-mostly admin data
//! consulted on every pricing decision. They are loaded once from the
//! repositories into `DashMap`s and handed by reference into the pure economy
//! functions, so no pricing surface ever reads the database mid-request.

use std::sync::Arc;

use dashmap::DashMap;
use emberfall_domain::{
    Archetype, ArchetypeId, Culture, CultureId, Heritage, HeritageId, Skill,
};

use crate::infrastructure::ports::{
    ArchetypeRepo, CultureRepo, HeritageRepo, RepoError, SkillRepo,
};

pub struct ReferenceDataService {
    heritage_repo: Arc<dyn HeritageRepo>,
    culture_repo: Arc<dyn CultureRepo>,
    archetype_repo: Arc<dyn ArchetypeRepo>,
    skill_repo: Arc<dyn SkillRepo>,

    heritages: DashMap<HeritageId, Heritage>,
    cultures: DashMap<CultureId, Culture>,
    archetypes: DashMap<ArchetypeId, Archetype>,
    /// Skills keyed by name - pricing and prerequisites reference skills by name
    skills: DashMap<String, Skill>,
}

impl ReferenceDataService {
    pub fn new(
        heritage_repo: Arc<dyn HeritageRepo>,
        culture_repo: Arc<dyn CultureRepo>,
        archetype_repo: Arc<dyn ArchetypeRepo>,
        skill_repo: Arc<dyn SkillRepo>,
    ) -> Self {
        Self {
            heritage_repo,
            culture_repo,
            archetype_repo,
            skill_repo,
            heritages: DashMap::new(),
            cultures: DashMap::new(),
            archetypes: DashMap::new(),
            skills: DashMap::new(),
        }
    }

    /// Replace the cached tables with the current repository contents.
    pub async fn reload(&self) -> Result<(), RepoError> {
        let heritages = self.heritage_repo.list().await?;
        let cultures = self.culture_repo.list().await?;
        let archetypes = self.archetype_repo.list().await?;
        let skills = self.skill_repo.list().await?;

        self.heritages.clear();
        for heritage in heritages {
            self.heritages.insert(heritage.id, heritage);
        }
        self.cultures.clear();
        for culture in cultures {
            self.cultures.insert(culture.id, culture);
        }
        self.archetypes.clear();
        for archetype in archetypes {
            self.archetypes.insert(archetype.id, archetype);
        }
        self.skills.clear();
        for skill in skills {
            self.skills.insert(skill.name.clone(), skill);
        }

        tracing::debug!(
            heritages = self.heritages.len(),
            cultures = self.cultures.len(),
            archetypes = self.archetypes.len(),
            skills = self.skills.len(),
            "Reloaded reference data"
        );

        Ok(())
    }

    pub fn heritage(&self, id: HeritageId) -> Option<Heritage> {
        self.heritages.get(&id).map(|h| h.clone())
    }

    pub fn culture(&self, id: CultureId) -> Option<Culture> {
        self.cultures.get(&id).map(|c| c.clone())
    }

    pub fn archetype(&self, id: ArchetypeId) -> Option<Archetype> {
        self.archetypes.get(&id).map(|a| a.clone())
    }

    pub fn skill_by_name(&self, name: &str) -> Option<Skill> {
        self.skills.get(name).map(|s| s.clone())
    }

    pub fn heritages(&self) -> Vec<Heritage> {
        self.heritages.iter().map(|e| e.value().clone()).collect()
    }

    pub fn cultures(&self) -> Vec<Culture> {
        self.cultures.iter().map(|e| e.value().clone()).collect()
    }

    pub fn archetypes(&self) -> Vec<Archetype> {
        self.archetypes.iter().map(|e| e.value().clone()).collect()
    }

    pub fn skills(&self) -> Vec<Skill> {
        self.skills.iter().map(|e| e.value().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockArchetypeRepo, MockCultureRepo, MockHeritageRepo, MockSkillRepo,
    };

    fn service_with(
        heritages: Vec<Heritage>,
        skills: Vec<Skill>,
    ) -> ReferenceDataService {
        let mut heritage_repo = MockHeritageRepo::new();
        heritage_repo
            .expect_list()
            .returning(move || Ok(heritages.clone()));
        let mut culture_repo = MockCultureRepo::new();
        culture_repo.expect_list().returning(|| Ok(vec![]));
        let mut archetype_repo = MockArchetypeRepo::new();
        archetype_repo.expect_list().returning(|| Ok(vec![]));
        let mut skill_repo = MockSkillRepo::new();
        skill_repo.expect_list().returning(move || Ok(skills.clone()));

        ReferenceDataService::new(
            Arc::new(heritage_repo),
            Arc::new(culture_repo),
            Arc::new(archetype_repo),
            Arc::new(skill_repo),
        )
    }

    #[tokio::test]
    async fn when_reloaded_lookups_hit_the_cache() {
        let heritage = Heritage::new("Human", 10, 10);
        let heritage_id = heritage.id;
        let skill = Skill::new("Bard");
        let service = service_with(vec![heritage], vec![skill]);

        service.reload().await.unwrap();

        assert_eq!(service.heritage(heritage_id).unwrap().name, "Human");
        assert!(service.skill_by_name("Bard").is_some());
        assert!(service.skill_by_name("Juggling").is_none());
    }

    #[tokio::test]
    async fn when_reloaded_twice_stale_entries_are_dropped() {
        let first = Heritage::new("Human", 10, 10);
        let first_id = first.id;
        let service = service_with(vec![first], vec![]);
        service.reload().await.unwrap();
        assert!(service.heritage(first_id).is_some());

        // Second reload returns the same rows here, but a cleared map plus
        // re-insert is what guarantees deletes propagate.
        service.reload().await.unwrap();
        assert_eq!(service.heritages().len(), 1);
    }
}
