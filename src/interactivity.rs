//! Pointer-interaction binder.
//!
//! Exactly one slide's children may be interactive: the slide that is
//! visually current. The transition engine calls [`disable`] on every
//! update tick for the outgoing slide and [`enable`] once for the
//! incoming slide on completion, so repeated disabling must be
//! idempotent and both calls must tolerate slides with no registered
//! children. Lookups always go through the live deck, never a cached
//! child list, so children registered by a late decode are still seen.

use crate::slide::SlideDeck;

pub fn enable(deck: &mut SlideDeck, index: usize) {
    set_interactive(deck, index, true);
}

pub fn disable(deck: &mut SlideDeck, index: usize) {
    set_interactive(deck, index, false);
}

fn set_interactive(deck: &mut SlideDeck, index: usize, on: bool) {
    let Some(slide) = deck.get_mut(index) else {
        return;
    };
    for child in slide.children_mut() {
        child.enabled = on;
        child.hit_testable = on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SlideshowConfig, loader::SlideImage, slide::SlideDeck};

    fn deck_with_children() -> SlideDeck {
        let config = SlideshowConfig {
            slides: vec!["a.png".to_string(), "b.png".to_string()],
            ..SlideshowConfig::default()
        };
        let mut deck = SlideDeck::from_config(&config);
        for i in 0..2 {
            deck.resolve_image(i, SlideImage::from_rgba8(1, 1, vec![0, 0, 0, 255]));
        }
        deck.register_children(0, &[1, 2], true);
        deck.register_children(1, &[3], false);
        deck
    }

    #[test]
    fn enable_sets_both_flags() {
        let mut deck = deck_with_children();
        enable(&mut deck, 1);
        let kid = deck.get(1).unwrap().children()[0];
        assert!(kid.enabled && kid.hit_testable);
    }

    #[test]
    fn disable_is_idempotent() {
        let mut deck = deck_with_children();
        disable(&mut deck, 0);
        let first = deck.get(0).unwrap().children().to_vec();
        disable(&mut deck, 0);
        assert_eq!(deck.get(0).unwrap().children(), first.as_slice());
        assert!(first.iter().all(|c| !c.enabled && !c.hit_testable));
    }

    #[test]
    fn out_of_range_and_childless_are_no_ops() {
        let config = SlideshowConfig {
            slides: vec!["a.png".to_string()],
            ..SlideshowConfig::default()
        };
        let mut deck = SlideDeck::from_config(&config);
        enable(&mut deck, 0);
        disable(&mut deck, 5);
    }
}
