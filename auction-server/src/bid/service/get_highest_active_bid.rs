use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        bid::entities,
    },
};

pub struct GetHighestActiveBidInput {
    pub auction_id: AuctionId,
}

/// The current highest standing bid: maximum amount over active bids, ties
/// broken by earliest bid time. This aggregate is the only place competitive
/// outbidding between different bidders is expressed.
pub fn highest_active(bids: &[entities::Bid]) -> Option<&entities::Bid> {
    bids.iter()
        .filter(|bid| bid.status.is_active())
        .fold(None, |best, candidate| match best {
            None => Some(candidate),
            Some(current) => {
                if candidate.amount > current.amount
                    || (candidate.amount == current.amount
                        && candidate.bid_time < current.bid_time)
                {
                    Some(candidate)
                } else {
                    Some(current)
                }
            }
        })
}

impl Service {
    pub async fn get_highest_active_bid(
        &self,
        input: GetHighestActiveBidInput,
    ) -> Result<Option<entities::Bid>, RestError> {
        let bids = self.repo.get_bids(input.auction_id).await?;
        Ok(highest_active(&bids).cloned())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::bid::entities::BidStatus,
        time::{
            Duration,
            OffsetDateTime,
        },
        uuid::Uuid,
    };

    fn bid(amount: u64, seconds: i64, status: BidStatus) -> entities::Bid {
        entities::Bid {
            id: Uuid::new_v4(),
            auction_id: Uuid::new_v4(),
            bidder: Uuid::new_v4(),
            amount,
            bid_time: OffsetDateTime::UNIX_EPOCH + Duration::seconds(seconds),
            note: None,
            status,
        }
    }

    #[test]
    fn superseded_and_finalized_bids_are_ignored() {
        let bids = vec![
            bid(900, 1, BidStatus::Outbid),
            bid(500, 2, BidStatus::Active),
            bid(800, 3, BidStatus::Cancelled),
        ];
        assert_eq!(highest_active(&bids).unwrap().amount, 500);
    }

    #[test]
    fn ties_resolve_to_the_earliest_bid() {
        let bids = vec![
            bid(500, 9, BidStatus::Active),
            bid(500, 4, BidStatus::Active),
            bid(300, 1, BidStatus::Active),
        ];
        let highest = highest_active(&bids).unwrap();
        assert_eq!(highest.amount, 500);
        assert_eq!(
            highest.bid_time,
            OffsetDateTime::UNIX_EPOCH + Duration::seconds(4)
        );
    }

    #[test]
    fn no_active_bids_means_no_leader() {
        assert!(highest_active(&[]).is_none());
        assert!(highest_active(&[bid(100, 1, BidStatus::Outbid)]).is_none());
    }
}
