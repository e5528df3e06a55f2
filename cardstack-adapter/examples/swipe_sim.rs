// Example: a host loop driving a card stack from simulated gestures.
use cardstack::{Constraints, ItemProvider, Offset, Placeable, StackConfig, StackPosition};
use cardstack_adapter::{CardStack, CardStackOptions, DragObserver, SwipeDirection};

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

struct Profiles {
    count: usize,
}

impl ItemProvider for Profiles {
    type Key = usize;
    type Content = Card;

    fn item_count(&self) -> usize {
        self.count
    }

    fn key(&self, index: usize) -> usize {
        index
    }

    fn measure(&mut self, _index: usize, constraints: Constraints) -> Vec<Card> {
        vec![Card {
            width: constraints.max_width,
            height: constraints.max_height,
        }]
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let options = CardStackOptions::new(
        StackConfig::default()
            .with_visible_cards(3)
            .with_stack_position(StackPosition::Top),
    )
    .with_on_swiped_item(Some(|index: usize, direction: SwipeDirection| {
        println!("swiped card {index} {direction:?}");
    }));
    let mut stack = CardStack::new(options).expect("inside a tokio runtime");
    let mut profiles = Profiles { count: 5 };
    let screen = Constraints::loose(360, 640);

    let gestures = [
        SwipeDirection::Left,
        SwipeDirection::Left,
        SwipeDirection::Right,
        SwipeDirection::Left,
    ];

    stack.layout(&mut profiles, screen, |_, _, _| {});
    for direction in gestures {
        // A recognizer reports a few drag ticks before committing.
        for step in 1..=3 {
            let dx = step as f32 * 40.0;
            let dx = if direction == SwipeDirection::Right { dx } else { -dx };
            stack.gesture_observer().on_drag(Offset::new(dx, 0.0), dx / 20.0);
        }
        stack.gesture_observer().on_swiped(direction);

        // Let the navigation task run, then lay out the next frame.
        tokio::task::yield_now().await;
        let pass = stack.layout(&mut profiles, screen, |item, _, placement| {
            println!(
                "  card {} rel={} offset={:?} z={}",
                item.key, item.relative_index, placement.offset, placement.z_index
            );
        });
        println!("frame {} shows card {}", pass.generation, pass.visible_item_index);
    }

    // Programmatic skip, awaited against the next frame.
    let handle = stack.state().clone();
    let current = handle.visible_item_index();
    let (skipped, _) = tokio::join!(handle.snap_to(current + 10), async {
        tokio::task::yield_now().await;
        stack.layout(&mut profiles, screen, |_, _, _| {})
    });
    println!("skip landed on {:?}", skipped);
}
