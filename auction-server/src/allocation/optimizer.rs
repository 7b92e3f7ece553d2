use {
    super::entities::{
        AllocationPlan,
        BestBid,
        BundledPlan,
        CategoryAward,
        CategoryBids,
        ItemizedPlan,
        Strategy,
    },
    crate::kernel::entities::Amount,
    std::collections::HashSet,
};

/// Pick the winning offer: highest amount, ties broken by earliest bid time.
pub fn best_of(bids: &[BestBid]) -> Option<&BestBid> {
    bids.iter().fold(None, |best, candidate| match best {
        None => Some(candidate),
        Some(current) => {
            if candidate.amount > current.amount
                || (candidate.amount == current.amount && candidate.bid_time < current.bid_time)
            {
                Some(candidate)
            } else {
                Some(current)
            }
        }
    })
}

/// Decide between awarding each medium lot to its own highest bidder and
/// awarding the whole batch to a single full-coverage bidder, net of a fixed
/// administrative cost per distinct contracted vendor.
///
/// `categories` carries the standing offers on the batch's medium lots;
/// `whole_batch_bids` the standing offers on the batch's whole-batch auction.
/// A lot with no offers is skipped and blocks nothing. On an exact net tie the
/// bundled strategy wins: one vendor relationship is cheaper to administer.
pub fn compute_plan(
    categories: &[CategoryBids],
    whole_batch_bids: &[BestBid],
    vendor_admin_cost: Amount,
) -> AllocationPlan {
    let itemized = compute_itemized(categories, vendor_admin_cost);
    let bundled = best_of(whole_batch_bids).map(|best| BundledPlan {
        bidder:   best.bidder,
        total:    best.amount,
        net:      best.amount as i64 - vendor_admin_cost as i64,
        bid_time: best.bid_time,
    });

    let selected = match (&itemized, &bundled) {
        (Some(itemized), Some(bundled)) => {
            if bundled.net >= itemized.net {
                Some(Strategy::Bundled)
            } else {
                Some(Strategy::Itemized)
            }
        }
        (Some(_), None) => Some(Strategy::Itemized),
        (None, Some(_)) => Some(Strategy::Bundled),
        (None, None) => None,
    };

    AllocationPlan {
        selected,
        itemized,
        bundled,
        vendor_admin_cost,
    }
}

fn compute_itemized(
    categories: &[CategoryBids],
    vendor_admin_cost: Amount,
) -> Option<ItemizedPlan> {
    let awards: Vec<CategoryAward> = categories
        .iter()
        .filter_map(|category| {
            best_of(&category.bids).map(|best| CategoryAward {
                medium: category.medium,
                bidder: best.bidder,
                amount: best.amount,
            })
        })
        .collect();
    if awards.is_empty() {
        return None;
    }

    let gross: Amount = awards.iter().map(|award| award.amount).sum();
    let vendors: HashSet<_> = awards.iter().map(|award| award.bidder).collect();
    let vendor_count = vendors.len() as u32;
    Some(ItemizedPlan {
        awards,
        gross,
        vendor_count,
        net: gross as i64 - vendor_count as i64 * vendor_admin_cost as i64,
    })
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            batch::entities::Medium,
            kernel::entities::BidderId,
        },
        time::{
            Duration,
            OffsetDateTime,
        },
        uuid::Uuid,
    };

    const ADMIN_COST: Amount = 600;

    fn bid(bidder: BidderId, amount: Amount, seconds: i64) -> BestBid {
        BestBid {
            bidder,
            amount,
            bid_time: OffsetDateTime::UNIX_EPOCH + Duration::seconds(seconds),
        }
    }

    fn category(medium: Medium, bids: Vec<BestBid>) -> CategoryBids {
        CategoryBids { medium, bids }
    }

    #[test]
    fn itemized_wins_when_no_whole_batch_bid_exists() {
        // Bidder Y covers both lots with separate bids, but separate lot bids
        // never form a bundle: bundled stays unavailable.
        let x = Uuid::new_v4();
        let y = Uuid::new_v4();
        let plan = compute_plan(
            &[
                category(Medium::Paper, vec![bid(x, 500, 1), bid(y, 300, 2)]),
                category(Medium::Electronic, vec![bid(y, 800, 3)]),
            ],
            &[],
            ADMIN_COST,
        );

        assert_eq!(plan.selected, Some(Strategy::Itemized));
        assert!(plan.bundled.is_none());
        let itemized = plan.itemized.unwrap();
        assert_eq!(itemized.gross, 1300);
        assert_eq!(itemized.vendor_count, 2);
        assert_eq!(itemized.net, 100);
        assert_eq!(
            itemized.awards,
            vec![
                CategoryAward {
                    medium: Medium::Paper,
                    bidder: x,
                    amount: 500,
                },
                CategoryAward {
                    medium: Medium::Electronic,
                    bidder: y,
                    amount: 800,
                },
            ]
        );
    }

    #[test]
    fn admin_cost_flips_the_decision_to_bundled() {
        // Gross itemized (1300) exceeds the bundled offer (1250), but two
        // vendor fees against one turn the comparison around: 100 vs 650.
        let x = Uuid::new_v4();
        let y = Uuid::new_v4();
        let z = Uuid::new_v4();
        let plan = compute_plan(
            &[
                category(Medium::Paper, vec![bid(x, 500, 1), bid(y, 300, 2)]),
                category(Medium::Electronic, vec![bid(y, 800, 3)]),
            ],
            &[bid(z, 1250, 4)],
            ADMIN_COST,
        );

        assert_eq!(plan.selected, Some(Strategy::Bundled));
        assert_eq!(plan.itemized.as_ref().unwrap().net, 100);
        let bundled = plan.bundled.unwrap();
        assert_eq!(bundled.bidder, z);
        assert_eq!(bundled.total, 1250);
        assert_eq!(bundled.net, 650);
    }

    #[test]
    fn single_category_reduces_to_the_same_net_either_way() {
        // A single-medium batch: the only lot's offers are also whole-batch
        // offers. Both nets must be identical and the tie resolve to bundled.
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let offers = vec![bid(a, 900, 1), bid(b, 700, 2)];
        let plan = compute_plan(
            &[category(Medium::Paper, offers.clone())],
            &offers,
            ADMIN_COST,
        );

        let itemized = plan.itemized.unwrap();
        let bundled = plan.bundled.unwrap();
        assert_eq!(itemized.net, bundled.net);
        assert_eq!(itemized.net, 300);
        assert_eq!(plan.selected, Some(Strategy::Bundled));
    }

    #[test]
    fn raising_a_lot_winner_raises_itemized_net_by_exactly_that_delta() {
        let x = Uuid::new_v4();
        let y = Uuid::new_v4();
        let z = Uuid::new_v4();
        let delta = 170;
        let base = compute_plan(
            &[
                category(Medium::Paper, vec![bid(x, 500, 1)]),
                category(Medium::Electronic, vec![bid(y, 800, 2)]),
            ],
            &[bid(z, 1250, 3)],
            ADMIN_COST,
        );
        let raised = compute_plan(
            &[
                category(Medium::Paper, vec![bid(x, 500 + delta, 1)]),
                category(Medium::Electronic, vec![bid(y, 800, 2)]),
            ],
            &[bid(z, 1250, 3)],
            ADMIN_COST,
        );

        assert_eq!(
            raised.itemized.unwrap().net,
            base.itemized.unwrap().net + delta as i64
        );
        assert_eq!(raised.bundled.unwrap().net, base.bundled.unwrap().net);
    }

    #[test]
    fn vendor_fee_is_charged_once_per_distinct_vendor() {
        let v = Uuid::new_v4();
        let plan = compute_plan(
            &[
                category(Medium::Paper, vec![bid(v, 400, 1)]),
                category(Medium::Electronic, vec![bid(v, 500, 2)]),
                category(Medium::Other, vec![bid(v, 300, 3)]),
            ],
            &[],
            ADMIN_COST,
        );

        let itemized = plan.itemized.unwrap();
        assert_eq!(itemized.vendor_count, 1);
        assert_eq!(itemized.net, 1200 - 600);
    }

    #[test]
    fn empty_category_is_excluded_and_blocks_nothing() {
        let x = Uuid::new_v4();
        let z = Uuid::new_v4();
        let plan = compute_plan(
            &[
                category(Medium::Paper, vec![bid(x, 900, 1)]),
                category(Medium::Electronic, vec![]),
            ],
            &[bid(z, 200, 2)],
            ADMIN_COST,
        );

        let itemized = plan.itemized.unwrap();
        assert_eq!(itemized.awards.len(), 1);
        assert_eq!(itemized.gross, 900);
        assert!(plan.bundled.is_some());
        assert_eq!(plan.selected, Some(Strategy::Itemized));
    }

    #[test]
    fn equal_amounts_go_to_the_earliest_bid() {
        let early = Uuid::new_v4();
        let late = Uuid::new_v4();
        let plan = compute_plan(
            &[category(
                Medium::Paper,
                vec![bid(late, 500, 10), bid(early, 500, 5)],
            )],
            &[bid(late, 700, 10), bid(early, 700, 5)],
            ADMIN_COST,
        );

        assert_eq!(plan.itemized.unwrap().awards[0].bidder, early);
        assert_eq!(plan.bundled.unwrap().bidder, early);
    }

    #[test]
    fn net_can_go_negative_under_the_vendor_fee() {
        let x = Uuid::new_v4();
        let plan = compute_plan(
            &[category(Medium::Other, vec![bid(x, 250, 1)])],
            &[],
            ADMIN_COST,
        );
        assert_eq!(plan.itemized.unwrap().net, -350);
        assert_eq!(plan.selected, Some(Strategy::Itemized));
    }

    #[test]
    fn no_bids_means_no_plan() {
        let plan = compute_plan(
            &[category(Medium::Paper, vec![]), category(Medium::Other, vec![])],
            &[],
            ADMIN_COST,
        );
        assert!(plan.selected.is_none());
        assert!(plan.itemized.is_none());
        assert!(plan.bundled.is_none());
    }

    #[test]
    fn exact_net_tie_prefers_bundled() {
        // Itemized: 1000 - 600 = 400. Bundled: 1000 - 600 = 400.
        let x = Uuid::new_v4();
        let z = Uuid::new_v4();
        let plan = compute_plan(
            &[category(Medium::Paper, vec![bid(x, 1000, 1)])],
            &[bid(z, 1000, 2)],
            ADMIN_COST,
        );
        assert_eq!(plan.selected, Some(Strategy::Bundled));
    }
}
