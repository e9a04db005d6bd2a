use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::model::lead::Lead;
use crate::service::fragrance_service::{FragranceService, FragranceServiceImpl};
use crate::service::lead_service::{LeadService, LeadServiceImpl};
use crate::service::quiz_service::{QuizService, QuizServiceImpl};
use crate::util::error::ServiceError;

pub const TOP_PRODUCTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_leads: usize,
    pub total_inventory: usize,
    pub active_quizzes: usize,
    pub out_of_stock_count: usize,
    pub top_products: Vec<ProductCount>,
}

/// Most frequent quiz results, ties in order of first appearance.
pub fn top_products(leads: &[Lead], limit: usize) -> Vec<ProductCount> {
    let mut counts: Vec<ProductCount> = Vec::new();
    for lead in leads.iter().filter(|l| !l.quiz_result.is_empty()) {
        match counts.iter_mut().find(|c| c.name == lead.quiz_result) {
            Some(entry) => entry.count += 1,
            None => counts.push(ProductCount { name: lead.quiz_result.clone(), count: 1 }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

#[async_trait]
pub trait AnalyticsService: Send + Sync {
    async fn stats(&self) -> Result<DashboardStats, ServiceError>;
}

pub struct AnalyticsServiceImpl {
    pub lead_service: Arc<LeadServiceImpl>,
    pub fragrance_service: Arc<FragranceServiceImpl>,
    pub quiz_service: Arc<QuizServiceImpl>,
}

impl AnalyticsServiceImpl {
    pub fn new(
        lead_service: Arc<LeadServiceImpl>,
        fragrance_service: Arc<FragranceServiceImpl>,
        quiz_service: Arc<QuizServiceImpl>,
    ) -> Self {
        Self { lead_service, fragrance_service, quiz_service }
    }
}

#[async_trait]
impl AnalyticsService for AnalyticsServiceImpl {
    async fn stats(&self) -> Result<DashboardStats, ServiceError> {
        let (leads, inventory, quizzes) = tokio::join!(
            self.lead_service.list(),
            self.fragrance_service.get_all(),
            self.quiz_service.get_active()
        );
        let leads = leads?;
        Ok(DashboardStats {
            total_leads: leads.len(),
            total_inventory: inventory.len(),
            active_quizzes: quizzes.len(),
            out_of_stock_count: inventory.iter().filter(|f| !f.in_stock).count(),
            top_products: top_products(&leads, TOP_PRODUCTS),
        })
    }
}
