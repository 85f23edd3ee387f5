//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{
    ArchetypeRepo, CandleRepo, ChapterRepo, CharacterRepo, ClockPort, CultureRepo, EventRepo,
    HeritageRepo, SettingsRepo, SkillRepo, UserRepo,
};
use crate::use_cases::{
    self, AccountUseCases, CandleUseCases, ChapterUseCases, CharacterUseCases, EventUseCases,
    ReferenceDataService, ReferenceUseCases,
};

/// Main application state.
///
/// Holds all repository ports and use cases. Passed to HTTP handlers via
/// Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
    pub reference: Arc<ReferenceDataService>,
}

/// Container for all repository ports.
pub struct Repositories {
    pub user: Arc<dyn UserRepo>,
    pub chapter: Arc<dyn ChapterRepo>,
    pub heritage: Arc<dyn HeritageRepo>,
    pub culture: Arc<dyn CultureRepo>,
    pub archetype: Arc<dyn ArchetypeRepo>,
    pub skill: Arc<dyn SkillRepo>,
    pub character: Arc<dyn CharacterRepo>,
    pub candle: Arc<dyn CandleRepo>,
    pub event: Arc<dyn EventRepo>,
    pub settings: Arc<dyn SettingsRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub accounts: AccountUseCases,
    pub chapters: ChapterUseCases,
    pub characters: CharacterUseCases,
    pub events: EventUseCases,
    pub candles: CandleUseCases,
    pub reference: ReferenceUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    ///
    /// Call [`ReferenceDataService::reload`] on `reference` before serving;
    /// the cache starts empty.
    pub fn new(repos: Repositories, clock: Arc<dyn ClockPort>) -> Self {
        let reference = Arc::new(ReferenceDataService::new(
            repos.heritage.clone(),
            repos.culture.clone(),
            repos.archetype.clone(),
            repos.skill.clone(),
        ));

        let accounts = AccountUseCases::new(
            repos.user.clone(),
            repos.chapter.clone(),
            clock.clone(),
        );
        let chapters = ChapterUseCases::new(repos.chapter.clone(), clock.clone());

        let characters = CharacterUseCases {
            create: Arc::new(use_cases::characters::CreateCharacter::new(
                repos.character.clone(),
                repos.user.clone(),
                reference.clone(),
                clock.clone(),
            )),
            get: Arc::new(use_cases::characters::GetCharacter::new(
                repos.character.clone(),
            )),
            list: Arc::new(use_cases::characters::ListCharacters::new(
                repos.character.clone(),
            )),
            ledger: Arc::new(use_cases::characters::GetLedger::new(
                repos.character.clone(),
            )),
            quote: Arc::new(use_cases::characters::QuoteSkill::new(
                repos.character.clone(),
                reference.clone(),
            )),
            purchase_skill: Arc::new(use_cases::characters::PurchaseSkill::new(
                repos.character.clone(),
                reference.clone(),
                clock.clone(),
            )),
            increase_attribute: Arc::new(use_cases::characters::IncreaseAttribute::new(
                repos.character.clone(),
                clock.clone(),
            )),
            purchase_archetype: Arc::new(use_cases::characters::PurchaseSecondArchetype::new(
                repos.character.clone(),
                reference.clone(),
                clock.clone(),
            )),
            award: Arc::new(use_cases::characters::AwardExperience::new(
                repos.character.clone(),
                repos.user.clone(),
                clock.clone(),
            )),
            set_status: Arc::new(use_cases::characters::SetCharacterStatus::new(
                repos.character.clone(),
                clock.clone(),
            )),
            retire: Arc::new(use_cases::characters::RetireCharacter::new(
                repos.character.clone(),
                clock.clone(),
            )),
        };

        let events = EventUseCases {
            schedule: Arc::new(use_cases::events::ScheduleEvent::new(
                repos.event.clone(),
                repos.chapter.clone(),
                clock.clone(),
            )),
            list: Arc::new(use_cases::events::ListEvents::new(repos.event.clone())),
            rsvp: Arc::new(use_cases::events::RsvpToEvent::new(
                repos.event.clone(),
                repos.character.clone(),
                clock.clone(),
            )),
            attendance: Arc::new(use_cases::events::RecordAttendance::new(
                repos.event.clone(),
                repos.character.clone(),
                clock.clone(),
            )),
        };

        let candles = CandleUseCases {
            grant: Arc::new(use_cases::candles::GrantCandles::new(
                repos.candle.clone(),
                repos.character.clone(),
                clock.clone(),
            )),
            spend: Arc::new(use_cases::candles::SpendCandles::new(
                repos.candle.clone(),
                repos.character.clone(),
                clock.clone(),
            )),
            ledger: Arc::new(use_cases::candles::CandleLedger::new(
                repos.candle.clone(),
                repos.character.clone(),
            )),
        };

        let reference_use_cases = ReferenceUseCases::new(
            Arc::new(use_cases::reference::ReferenceAdmin::new(
                repos.heritage.clone(),
                repos.culture.clone(),
                repos.archetype.clone(),
                repos.skill.clone(),
                repos.settings.clone(),
                reference.clone(),
            )),
            Arc::new(use_cases::reference::ValidateReferenceData::new(
                reference.clone(),
            )),
        );

        Self {
            repositories: repos,
            use_cases: UseCases {
                accounts,
                chapters,
                characters,
                events,
                candles,
                reference: reference_use_cases,
            },
            reference,
        }
    }
}
