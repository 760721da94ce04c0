use crate::domain::provider::Channel;
use serde::{Deserialize, Serialize};

/// Relative transaction volume per channel. Weights need not sum to 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelMix {
    #[serde(default)]
    pub in_person: f64,
    #[serde(default)]
    pub online: f64,
    #[serde(default)]
    pub phone: f64,
}

impl ChannelMix {
    pub fn new(in_person: f64, online: f64, phone: f64) -> Self {
        Self {
            in_person,
            online,
            phone,
        }
    }

    pub fn in_person_only() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn weight(&self, channel: Channel) -> f64 {
        match channel {
            Channel::InPerson => self.in_person,
            Channel::Online => self.online,
            Channel::Phone => self.phone,
        }
    }

    fn weight_mut(&mut self, channel: Channel) -> &mut f64 {
        match channel {
            Channel::InPerson => &mut self.in_person,
            Channel::Online => &mut self.online,
            Channel::Phone => &mut self.phone,
        }
    }

    /// Equal share per selected channel. Repeated selections accumulate.
    /// No selection at all falls back to in-person.
    pub fn from_channels(channels: &[Channel]) -> Self {
        if channels.is_empty() {
            return Self::in_person_only();
        }
        let share = 1.0 / channels.len() as f64;
        let mut mix = Self::default();
        for channel in channels {
            *mix.weight_mut(*channel) += share;
        }
        mix
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantProfile {
    pub annual_revenue_gbp: f64,
    pub avg_transaction_gbp: f64,
    #[serde(default)]
    pub mix: ChannelMix,
    #[serde(default)]
    pub amortise_months: Option<u32>,
}
