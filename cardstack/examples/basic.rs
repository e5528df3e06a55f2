// Example: lay out a stack, swipe a few cards away, then shrink the collection.
use cardstack::{Constraints, ItemProvider, MeasurePolicy, Placeable, StackConfig, StackState};

struct Card {
    width: u32,
    height: u32,
}

impl Placeable for Card {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

struct Photos {
    names: Vec<&'static str>,
}

impl ItemProvider for Photos {
    type Key = &'static str;
    type Content = Card;

    fn item_count(&self) -> usize {
        self.names.len()
    }

    fn key(&self, index: usize) -> &'static str {
        self.names[index]
    }

    fn measure(&mut self, _index: usize, constraints: Constraints) -> Vec<Card> {
        vec![Card {
            width: constraints.max_width,
            height: constraints.max_height.min(480),
        }]
    }
}

fn main() {
    let mut photos = Photos {
        names: vec!["alps", "beach", "canyon", "delta", "fjord"],
    };
    let mut policy = MeasurePolicy::new(StackConfig::default().with_visible_cards(3));
    let mut state = StackState::new();
    let constraints = Constraints::loose(360, 640);

    for _ in 0..3 {
        let layout = policy.measure(&mut state, &mut photos, constraints);
        layout.place(|item, _, placement| {
            println!(
                "  {:>7} rel={} offset={:?} z={}",
                item.key, item.relative_index, placement.offset, placement.z_index
            );
        });
        let current = state.visible_item_index();
        println!("swipe {current}");
        state.advance(current);
    }

    // The front of the collection disappears under our feet.
    photos.names.truncate(2);
    let layout = policy.measure(&mut state, &mut photos, constraints);
    println!(
        "after shrink: index={} window={:?}",
        state.visible_item_index(),
        layout.window
    );
}
