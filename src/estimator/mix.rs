use crate::domain::merchant::ChannelMix;

fn clamp_weight(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// Scales the mix so its weights sum to 1. An all-zero mix means nothing was
/// selected and is treated as all in-person.
pub fn normalise_mix(mix: &ChannelMix) -> ChannelMix {
    let mut in_person = clamp_weight(mix.in_person);
    let mut online = clamp_weight(mix.online);
    let mut phone = clamp_weight(mix.phone);

    let mut total = in_person + online + phone;
    if total <= 0.0 {
        return ChannelMix::in_person_only();
    }
    if !total.is_finite() {
        // Weights are finite but their sum overflowed; rescale first.
        let largest = in_person.max(online).max(phone);
        in_person /= largest;
        online /= largest;
        phone /= largest;
        total = in_person + online + phone;
    }

    ChannelMix {
        in_person: in_person / total,
        online: online / total,
        phone: phone / total,
    }
}
