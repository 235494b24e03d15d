/// Tuning constants for agents and the stock behaviours.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SteeringConfig {
    /// Speed clamp applied after every integration step.
    pub max_speed: f32,
    /// How quickly velocity converges on the requested velocity, per second.
    pub accel_rate: f32,
    /// Degrees turned per second when facing the direction of travel.
    pub turn_rate: f32,
    pub wander_speed: f32,
    /// Seconds between wander heading changes.
    pub wander_interval: f32,
    pub seek_speed: f32,
    pub flee_speed: f32,
    pub pursue_speed: f32,
    pub arrive_speed: f32,
    pub slowing_radius: f32,
    /// Full opening angle of the vision cone, in degrees.
    pub vision_cone: f32,
    pub vision_range: f32,
    /// Swarm attraction strength.
    pub swarm_a: f32,
    /// Swarm repulsion strength.
    pub swarm_b: f32,
    /// Swarm attraction exponent.
    pub swarm_n: f32,
    /// Swarm repulsion exponent.
    pub swarm_m: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            max_speed: 600.0,
            accel_rate: 5.0,
            turn_rate: 500.0,
            wander_speed: 50.0,
            wander_interval: 2.0,
            seek_speed: 100.0,
            flee_speed: 100.0,
            pursue_speed: 200.0,
            arrive_speed: 200.0,
            slowing_radius: 150.0,
            vision_cone: 60.0,
            vision_range: 200.0,
            swarm_a: 200.0,
            swarm_b: 6000.0,
            swarm_n: 0.0,
            swarm_m: 1.0,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: SteeringConfig = serde_json::from_str(r#"{"seek_speed": 42.0}"#).unwrap();
        assert_eq!(cfg.seek_speed, 42.0);
        assert_eq!(cfg.max_speed, SteeringConfig::default().max_speed);
    }
}
