//! Service layer
//!
//! Each service is a cheap clone over the shared pool. Public operations
//! return [`shared::error::AppResult`]; mutations take the acting user id
//! explicitly and write an audit entry once the change is stored.

pub mod audit;
pub mod contribution;
pub mod eligibility;
pub mod employer;
pub mod member;

pub use audit::AuditService;
pub use contribution::ContributionService;
pub use eligibility::EligibilityService;
pub use employer::EmployerService;
pub use member::MemberService;

use sqlx::SqlitePool;

/// All services wired over one pool
#[derive(Debug, Clone)]
pub struct Services {
    pub members: MemberService,
    pub contributions: ContributionService,
    pub employers: EmployerService,
    pub eligibility: EligibilityService,
    pub audit: AuditService,
}

impl Services {
    pub fn new(pool: SqlitePool) -> Self {
        let audit = AuditService::new(pool.clone());
        let contributions = ContributionService::new(pool.clone(), audit.clone());
        Self {
            members: MemberService::new(pool.clone(), audit.clone()),
            employers: EmployerService::new(pool.clone(), audit.clone()),
            eligibility: EligibilityService::new(pool, contributions.clone(), audit.clone()),
            contributions,
            audit,
        }
    }
}
