//! Overage calculation
//!
//! Compares required quantities against a tier's included allotments:
//! - Organization seats: `max(0, required - included)` per role
//! - Project seats: per-project excess multiplied by the active project count
//! - Storage/bandwidth: excess rounded up to whole blocks

use slate_common::{
    blocks, excess, Overages, ResourceRequirements, Tier, ACTIVE_BLOCK_TB, ARCHIVE_BLOCK_TB,
    BANDWIDTH_BLOCK_GB,
};
use tracing::debug;

/// Compute excess seats and block counts for a set of requirements
pub fn compute_overages(tier: &Tier, required: &ResourceRequirements) -> Overages {
    let owner_seats = seat_excess(required.owner_seats, tier.org_seats.owner);
    let collaborative_seats =
        seat_excess(required.collaborative_seats, tier.org_seats.collaborative);

    let projects = u64::from(required.active_projects);
    let non_collaborative_seats = seat_excess(
        required.non_collaborative_per_project,
        tier.project_seats.non_collaborative,
    ) * projects;
    let view_only_seats = seat_excess(
        required.view_only_per_project,
        tier.project_seats.view_only,
    ) * projects;

    let active_blocks = blocks(
        excess(required.active_tb, tier.storage.active_tb),
        ACTIVE_BLOCK_TB,
    );
    let archive_blocks = blocks(
        excess(required.archive_tb, tier.storage.archive_tb),
        ARCHIVE_BLOCK_TB,
    );
    let bandwidth_blocks = blocks(
        excess(required.bandwidth_gb, tier.bandwidth_gb),
        BANDWIDTH_BLOCK_GB,
    );

    let overages = Overages {
        owner_seats,
        collaborative_seats,
        non_collaborative_seats,
        view_only_seats,
        active_blocks,
        archive_blocks,
        bandwidth_blocks,
    };

    debug!(tier = %tier.key, ?overages, "Computed overages");
    overages
}

#[inline]
fn seat_excess(required: u32, included: u32) -> u64 {
    u64::from(required.saturating_sub(included))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use slate_common::RateCard;

    fn starter() -> Tier {
        RateCard::builtin().tier("starter").unwrap().clone()
    }

    #[test]
    fn test_within_allotment_is_zero() {
        let required = ResourceRequirements::default()
            .with_owner_seats(1)
            .with_collaborative_seats(2)
            .with_active_projects(5)
            .with_project_seats(3, 3)
            .with_storage(dec!(1), dec!(2))
            .with_bandwidth(dec!(500));

        assert!(compute_overages(&starter(), &required).is_empty());
    }

    #[test]
    fn test_below_allotment_never_negative() {
        let overages = compute_overages(&starter(), &ResourceRequirements::default());
        assert!(overages.is_empty());
    }

    #[test]
    fn test_org_seat_excess() {
        let required = ResourceRequirements::default()
            .with_owner_seats(4)
            .with_collaborative_seats(5);
        let overages = compute_overages(&starter(), &required);

        assert_eq!(overages.owner_seats, 3);
        assert_eq!(overages.collaborative_seats, 3);
        assert_eq!(overages.total_added_seats(), 6);
    }

    #[test]
    fn test_project_seats_scale_with_projects() {
        // 2 over per project on both roles, across 4 projects
        let required = ResourceRequirements::default()
            .with_active_projects(4)
            .with_project_seats(5, 5);
        let overages = compute_overages(&starter(), &required);

        assert_eq!(overages.non_collaborative_seats, 8);
        assert_eq!(overages.view_only_seats, 8);
    }

    #[test]
    fn test_project_seats_without_projects() {
        let required = ResourceRequirements::default().with_project_seats(10, 10);
        let overages = compute_overages(&starter(), &required);

        assert_eq!(overages.non_collaborative_seats, 0);
        assert_eq!(overages.view_only_seats, 0);
    }

    #[test]
    fn test_partial_blocks_round_up() {
        let required = ResourceRequirements::default()
            .with_storage(dec!(1.1), dec!(2.5))
            .with_bandwidth(dec!(501));
        let overages = compute_overages(&starter(), &required);

        assert_eq!(overages.active_blocks, 1);
        assert_eq!(overages.archive_blocks, 1);
        assert_eq!(overages.bandwidth_blocks, 1);
    }

    #[test]
    fn test_whole_blocks() {
        let required = ResourceRequirements::default()
            .with_storage(dec!(2.0), dec!(6))
            .with_bandwidth(dec!(1500));
        let overages = compute_overages(&starter(), &required);

        assert_eq!(overages.active_blocks, 1);
        assert_eq!(overages.archive_blocks, 2);
        assert_eq!(overages.bandwidth_blocks, 2);
    }
}
