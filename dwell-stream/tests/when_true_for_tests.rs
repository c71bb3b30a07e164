// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use dwell_core::{OnOff, StateSnapshot};
use dwell_runtime::{Scheduler, VirtualInstant, VirtualScheduler};
use dwell_stream::prelude::*;
use dwell_test_utils::fixtures::{at, ticks, SwitchTransition};
use dwell_test_utils::{test_channel, values_now, TestEntity};

#[test]
fn test_when_true_for_last_changed_shorter_ago_than_threshold_false() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(10));
    let entity = TestEntity::with_state(OnOff::On, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();

    // Act
    let mut result = transitions.when_true_for(ticks(1), entity, scheduler.clone());

    // Assert
    assert_eq!(values_now(&mut result), vec![false]);
}

#[test]
fn test_when_true_for_last_changed_longer_ago_than_threshold_true() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(11));
    let entity = TestEntity::with_state(OnOff::On, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();

    // Act
    let mut result = transitions.when_true_for(ticks(1), entity, scheduler.clone());

    // Assert
    assert_eq!(values_now(&mut result), vec![true]);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn test_when_true_for_subscribe_after_threshold_passes_true() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(10));
    let entity = TestEntity::with_state(OnOff::On, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();
    let mut result = transitions.when_true_for(ticks(1), entity.clone(), scheduler.clone());

    // Act
    entity.overwrite(OnOff::On, at(9));

    // Assert
    assert_eq!(values_now(&mut result), vec![true]);
}

#[test]
fn test_when_true_for_last_changed_halfway_true_after_remaining_time() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(12));
    let entity = TestEntity::with_state(OnOff::On, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();
    let mut result = transitions.when_true_for(ticks(4), entity, scheduler.clone());

    // Act & Assert
    assert_eq!(values_now(&mut result), vec![false]);

    scheduler.advance_by(ticks(1));
    assert_eq!(values_now(&mut result), Vec::<bool>::new());

    scheduler.advance_by(ticks(1));
    assert_eq!(values_now(&mut result), vec![true]);
}

#[test]
fn test_when_true_for_predicate_last_changed_shorter_ago_than_threshold_false() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(10));
    let entity = TestEntity::with_state(OnOff::Off, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();

    // Act
    let mut result =
        transitions.when_true_for_by(ticks(1), Predicate::is_off(), entity, scheduler.clone());

    // Assert
    assert_eq!(values_now(&mut result), vec![false]);
}

#[test]
fn test_when_true_for_predicate_last_changed_longer_ago_than_threshold_true() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(11));
    let entity = TestEntity::with_state(OnOff::Off, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();

    // Act
    let mut result =
        transitions.when_true_for_by(ticks(1), Predicate::is_off(), entity, scheduler.clone());

    // Assert
    assert_eq!(values_now(&mut result), vec![true]);
}

#[test]
fn test_when_true_for_predicate_subscribe_after_threshold_passes_true() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(10));
    let entity = TestEntity::with_state(OnOff::On, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();
    let mut result =
        transitions.when_true_for_by(ticks(1), Predicate::is_off(), entity.clone(), scheduler.clone());

    // Act
    entity.overwrite(OnOff::Off, at(9));

    // Assert
    assert_eq!(values_now(&mut result), vec![true]);
}

#[test]
fn test_when_true_for_predicate_last_changed_halfway_true_after_remaining_time() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(12));
    let entity = TestEntity::with_state(OnOff::Off, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();
    let mut result =
        transitions.when_true_for_by(ticks(4), Predicate::is_off(), entity, scheduler.clone());

    // Act & Assert
    assert_eq!(values_now(&mut result), vec![false]);

    scheduler.advance_by(ticks(1));
    assert_eq!(values_now(&mut result), Vec::<bool>::new());

    scheduler.advance_by(ticks(1));
    assert_eq!(values_now(&mut result), vec![true]);
}

#[test]
fn test_when_true_for_elapsed_equal_to_threshold_resolves_immediately() {
    let scheduler = VirtualScheduler::starting_at(at(14));
    let entity = TestEntity::with_state(OnOff::On, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();

    let mut result = transitions.when_true_for(ticks(4), entity, scheduler.clone());

    assert_eq!(values_now(&mut result), vec![true]);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn test_when_true_for_turning_on_after_subscription_waits_full_threshold() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::with_state(OnOff::Off, at(0));
    let (tx, transitions) = test_channel();
    let mut result = transitions.when_true_for(ticks(3), entity.clone(), scheduler.clone());
    assert_eq!(values_now(&mut result), vec![false]);

    // Act
    scheduler.advance_by(ticks(5));
    tx.send(entity.change(OnOff::On, scheduler.now())).unwrap();

    // Assert
    assert_eq!(values_now(&mut result), Vec::<bool>::new());
    assert_eq!(scheduler.pending_count(), 1);

    scheduler.advance_by(ticks(2));
    assert_eq!(values_now(&mut result), Vec::<bool>::new());

    scheduler.advance_by(ticks(1));
    assert_eq!(values_now(&mut result), vec![true]);
}

#[test]
fn test_when_true_for_turning_off_before_deadline_cancels() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::with_state(OnOff::On, at(0));
    let (tx, transitions) = test_channel();
    let mut result = transitions.when_true_for(ticks(4), entity.clone(), scheduler.clone());
    assert_eq!(values_now(&mut result), vec![false]);

    // Act
    scheduler.advance_by(ticks(2));
    tx.send(entity.change(OnOff::Off, scheduler.now())).unwrap();

    // Assert
    assert_eq!(values_now(&mut result), Vec::<bool>::new());
    assert_eq!(scheduler.pending_count(), 0);

    scheduler.advance_by(ticks(10));
    assert_eq!(values_now(&mut result), Vec::<bool>::new());
    assert_eq!(scheduler.fired_count(), 0);
}

#[test]
fn test_when_true_for_turning_off_after_true_emits_false() {
    let scheduler = VirtualScheduler::starting_at(at(20));
    let entity = TestEntity::with_state(OnOff::On, at(0));
    let (tx, transitions) = test_channel();
    let mut result = transitions.when_true_for(ticks(4), entity.clone(), scheduler.clone());
    assert_eq!(values_now(&mut result), vec![true]);

    tx.send(entity.change(OnOff::Off, scheduler.now())).unwrap();

    assert_eq!(values_now(&mut result), vec![false]);
}

#[test]
fn test_when_true_for_unchanged_true_does_not_reset_timer() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::with_state(OnOff::On, at(0));
    let (tx, transitions) = test_channel();
    let mut result = transitions.when_true_for(ticks(4), entity.clone(), scheduler.clone());
    assert_eq!(values_now(&mut result), vec![false]);

    // Act
    scheduler.advance_by(ticks(2));
    tx.send(entity.change(OnOff::On, scheduler.now())).unwrap();
    assert_eq!(values_now(&mut result), Vec::<bool>::new());

    // Assert
    scheduler.advance_by(ticks(2));
    assert_eq!(values_now(&mut result), vec![true]);
}

#[test]
fn test_when_true_for_uses_entity_last_changed_over_transition() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(5));
    let entity = TestEntity::with_state(OnOff::Off, at(0));
    let (tx, transitions) = test_channel();
    let mut result = transitions.when_true_for(ticks(4), entity.clone(), scheduler.clone());
    assert_eq!(values_now(&mut result), vec![false]);

    // Act
    let transition = entity.change(OnOff::On, at(5));
    entity.overwrite(OnOff::On, at(1));
    tx.send(transition).unwrap();

    // Assert
    assert_eq!(values_now(&mut result), vec![true]);
}

#[test]
fn test_when_true_for_future_last_changed_lengthens_wait() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(3));
    let entity = TestEntity::with_state(OnOff::On, at(5));
    let (_tx, transitions) = test_channel::<SwitchTransition>();
    let mut result = transitions.when_true_for(ticks(2), entity, scheduler.clone());

    // Act & Assert
    assert_eq!(values_now(&mut result), vec![false]);

    scheduler.advance_by(ticks(3));
    assert_eq!(values_now(&mut result), Vec::<bool>::new());

    scheduler.advance_by(ticks(1));
    assert_eq!(values_now(&mut result), vec![true]);
}

#[test]
fn test_when_true_for_zero_threshold_is_immediate() {
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::with_state(OnOff::Off, at(0));
    let (tx, transitions) = test_channel();
    let mut result = transitions.when_true_for(ticks(0), entity.clone(), scheduler.clone());
    assert_eq!(values_now(&mut result), vec![false]);

    tx.send(entity.change(OnOff::On, scheduler.now())).unwrap();

    assert_eq!(values_now(&mut result), vec![true]);
    assert_eq!(scheduler.pending_count(), 0);
}

#[test]
fn test_when_true_for_absent_entity_is_false() {
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::<OnOff, VirtualInstant>::absent();
    let (tx, transitions) = test_channel();
    let mut result = transitions.when_true_for(ticks(1), entity.clone(), scheduler.clone());
    assert_eq!(values_now(&mut result), vec![false]);

    tx.send(entity.change(OnOff::On, at(0))).unwrap();
    assert_eq!(values_now(&mut result), Vec::<bool>::new());
    scheduler.advance_by(ticks(1));
    assert_eq!(values_now(&mut result), vec![true]);

    tx.send(entity.change_to(None)).unwrap();
    assert_eq!(values_now(&mut result), vec![false]);
}

#[test]
fn test_when_true_for_with_custom_last_changed() {
    // Arrange
    let scheduler = VirtualScheduler::starting_at(at(10));
    let entity = TestEntity::with_state(OnOff::On, at(10));
    let (_tx, transitions) = test_channel::<SwitchTransition>();
    let options = GateOptions::when_true_for(ticks(4))
        .with_last_changed(|snapshot: &StateSnapshot<OnOff, VirtualInstant>| {
            snapshot.last_changed() - ticks(2)
        });

    // Act
    let mut result = transitions.when_true_for_with(options, entity, scheduler.clone());

    // Assert
    assert_eq!(values_now(&mut result), vec![false]);
    scheduler.advance_by(ticks(2));
    assert_eq!(values_now(&mut result), vec![true]);
}

#[test]
fn test_when_true_for_with_forces_mode() {
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::with_state(OnOff::On, at(0));
    let (_tx, transitions) = test_channel::<SwitchTransition>();

    let result = transitions.when_true_for_with(
        GateOptions::limit_true_duration(ticks(4)),
        entity,
        scheduler,
    );

    assert_eq!(result.options().mode(), GateMode::WhenTrueFor);
}

#[test]
fn test_when_true_for_flapping_emits_each_flip_once() {
    // Arrange
    let scheduler = VirtualScheduler::new();
    let entity = TestEntity::with_state(OnOff::Off, at(0));
    let (tx, transitions) = test_channel();
    let mut result = transitions.when_true_for(ticks(2), entity.clone(), scheduler.clone());
    assert_eq!(values_now(&mut result), vec![false]);

    // Act & Assert
    for _ in 0..3 {
        tx.send(entity.change(OnOff::On, scheduler.now())).unwrap();
        assert_eq!(values_now(&mut result), Vec::<bool>::new());
        scheduler.advance_by(ticks(1));

        tx.send(entity.change(OnOff::Off, scheduler.now())).unwrap();
        assert_eq!(values_now(&mut result), Vec::<bool>::new());
        scheduler.advance_by(ticks(1));
    }

    tx.send(entity.change(OnOff::On, scheduler.now())).unwrap();
    assert_eq!(values_now(&mut result), Vec::<bool>::new());
    scheduler.advance_by(ticks(2));

    assert_eq!(values_now(&mut result), vec![true]);
    assert_eq!(scheduler.fired_count(), 1);
}
