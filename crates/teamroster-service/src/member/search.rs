//! Member search, unpaged and paged.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use teamroster_core::query::{OrderSpecifier, paginate};
use teamroster_core::result::AppResult;
use teamroster_core::traits::ProjectionSource;
use teamroster_core::types::{Page, PageRequest};
use teamroster_entity::{MemberSearchCondition, MemberTeamDto};

use super::predicate::condition_predicate;

/// Searches the member/team projection.
#[derive(Clone)]
pub struct MemberSearchService {
    /// Member/team projection source.
    source: Arc<dyn ProjectionSource<MemberTeamDto>>,
}

impl fmt::Debug for MemberSearchService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberSearchService").finish_non_exhaustive()
    }
}

impl MemberSearchService {
    /// Creates a new search service.
    pub fn new(source: Arc<dyn ProjectionSource<MemberTeamDto>>) -> Self {
        Self { source }
    }

    /// Every matching row in storage order.
    pub async fn search(&self, condition: &MemberSearchCondition) -> AppResult<Vec<MemberTeamDto>> {
        let predicate = condition_predicate(condition);
        let rows = self.source.fetch(&predicate, &[], None).await?;
        debug!(rows = rows.len(), "Member search completed");
        Ok(rows)
    }

    /// One page of matching rows plus the total match count.
    ///
    /// The count query only runs when the page alone cannot determine the
    /// total. Content and count share the same predicate.
    pub async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
        order: &[OrderSpecifier],
    ) -> AppResult<Page<MemberTeamDto>> {
        let predicate = condition_predicate(condition);
        let source = &self.source;

        let result = paginate(
            page,
            |bounds| source.fetch(&predicate, order, Some(bounds)),
            || source.count_matching(&predicate),
        )
        .await?;

        debug!(
            offset = page.offset(),
            page_size = page.page_size(),
            rows = result.content.len(),
            total = result.total_elements,
            "Member page search completed"
        );
        Ok(result)
    }

    /// The single matching row, if any. More than one match is a
    /// `NonUniqueResult` error.
    pub async fn find_one(
        &self,
        condition: &MemberSearchCondition,
    ) -> AppResult<Option<MemberTeamDto>> {
        self.source.fetch_one(&condition_predicate(condition)).await
    }
}
