//! Member management service

use std::cmp::Ordering;

use validator::Validate;

use crate::{
    config::LendingConfig,
    engine::{query::compare_text, Clock},
    error::{AppError, AppResult},
    models::{ListQuery, Member, MemberDraft, MemberSort, Page, SortOrder},
    repository::Repository,
};

use super::{order_or, pipeline_for};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
    config: LendingConfig,
    clock: Clock,
}

impl MembersService {
    pub fn new(repository: Repository, config: LendingConfig, clock: Clock) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    pub async fn list_members(&self, query: &ListQuery<MemberSort>) -> AppResult<Page<Member>> {
        let members = self.repository.members.list_members().await?;
        let sort = query.sort.unwrap_or_default();
        let order = order_or(query.order, SortOrder::Asc);

        let page = pipeline_for(query, &self.config).run(
            &members,
            |m| format!("{} {} {}", m.full_name, m.email, m.phone_number),
            |a, b| compare_members(a, b, sort, order),
        );
        Ok(page.map(Clone::clone))
    }

    pub async fn get_member(&self, id: i32) -> AppResult<Member> {
        self.repository.members.get_member(id).await
    }

    pub async fn create_member(&self, draft: MemberDraft) -> AppResult<Member> {
        self.check_draft(&draft)?;
        let member = self.repository.members.create_member(draft).await?;
        tracing::info!("Member {} created", member.id);
        Ok(member)
    }

    pub async fn update_member(&self, id: i32, draft: MemberDraft) -> AppResult<Member> {
        self.check_draft(&draft)?;
        self.repository.members.update_member(id, draft).await
    }

    pub async fn delete_member(&self, id: i32) -> AppResult<()> {
        self.repository.members.delete_member(id).await?;
        tracing::info!("Member {} deleted", id);
        Ok(())
    }

    fn check_draft(&self, draft: &MemberDraft) -> AppResult<()> {
        draft.validate()?;
        let today = self.clock.today();
        if draft.joining_date > today {
            return Err(AppError::InvalidInput(format!(
                "joining_date {} is in the future",
                draft.joining_date
            )));
        }
        Ok(())
    }
}

fn compare_members(a: &Member, b: &Member, sort: MemberSort, order: SortOrder) -> Ordering {
    let primary = match sort {
        MemberSort::FullName => compare_text(&a.full_name, &b.full_name),
        MemberSort::JoiningDate => a.joining_date.cmp(&b.joining_date),
        MemberSort::Email => compare_text(&a.email, &b.email),
    };
    order.apply(primary).then(a.id.cmp(&b.id))
}
