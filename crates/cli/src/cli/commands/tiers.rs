//! Pricing tier command handlers.

use std::sync::Arc;

use anyhow::Result;
use memberdesk_domain::{CreateTierRequest, ReorderTiersRequest, TierQuery, UpdateTierRequest};
use memberdesk_infra::{ApiClient, TierCommands};

use super::super::{TierCommand, TierFields};
use super::print_json;

pub async fn run(client: Arc<ApiClient>, command: TierCommand) -> Result<()> {
    let tiers = TierCommands::new(client);

    match command {
        TierCommand::List { tier_type, recommended, filters } => {
            let query = TierQuery {
                tier_type,
                is_active: filters.active,
                is_recommended: recommended,
                search: filters.search,
                take: filters.take,
                skip: filters.skip,
                sort_by: filters.sort_by,
                order: filters.order,
            };
            print_json(&tiers.list(&query).await?)
        }
        TierCommand::Active { tier_type } => print_json(&tiers.active(tier_type).await?),
        TierCommand::Create { fields } => print_json(&tiers.create(&create_request(fields)).await?),
        TierCommand::Update { id, fields, recommended, active } => {
            let create = create_request(fields);
            let payload = UpdateTierRequest {
                name: create.name,
                discount_type: create.discount_type,
                original_price: create.original_price,
                discount_amount: create.discount_amount,
                tier_type: create.tier_type,
                summary: create.summary,
                benefits: create.benefits,
                monthly_entries: create.monthly_entries,
                is_recommended: recommended,
                is_active: active,
            };
            print_json(&tiers.update(&id, &payload).await?)
        }
        TierCommand::Deactivate { id } => Ok(tiers.deactivate(&id).await?),
        TierCommand::Recommend { id } => Ok(tiers.set_recommended(&id).await?),
        TierCommand::Reorder { first, second, tier_type } => {
            let payload =
                ReorderTiersRequest { first_tier_id: first, second_tier_id: second, tier_type };
            Ok(tiers.reorder(&payload).await?)
        }
        TierCommand::Delete { id } => Ok(tiers.delete(&id).await?),
    }
}

fn create_request(fields: TierFields) -> CreateTierRequest {
    CreateTierRequest {
        name: fields.name,
        discount_type: fields.discount_type,
        original_price: fields.price,
        discount_amount: fields.discount,
        tier_type: fields.tier_type,
        summary: fields.summary,
        benefits: fields.benefits,
        monthly_entries: fields.entries,
    }
}
