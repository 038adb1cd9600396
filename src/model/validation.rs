use crate::error::{ChartError, ChartResult, FieldOwner};

use super::ChartDefinition;

/// Checks a chart definition before anything is built.
///
/// Checks run in a fixed order and the first violation is returned. On
/// success the chart name is returned.
pub(super) fn validate_chart_definition(definition: &ChartDefinition) -> ChartResult<&str> {
    let chart = definition.name.as_deref().ok_or(ChartError::MissingName)?;

    let Some(first) = definition.data.first() else {
        return Err(ChartError::EmptyData {
            chart: chart.to_owned(),
        });
    };

    for axis in &definition.axes {
        if let Some(field) = &axis.field {
            if !first.contains_key(field) {
                return Err(ChartError::FieldNotFound {
                    chart: chart.to_owned(),
                    field: field.clone(),
                    owner: FieldOwner::Axis(axis.name.clone()),
                });
            }
        }
    }

    for axis_name in [&definition.cast.axes.x, &definition.cast.axes.y] {
        let matches = definition
            .axes
            .iter()
            .filter(|axis| &axis.name == axis_name)
            .count();
        if matches == 0 {
            return Err(ChartError::AxisMissing {
                chart: chart.to_owned(),
                axis: axis_name.clone(),
            });
        }
        if matches > 1 {
            return Err(ChartError::AxisAmbiguous {
                chart: chart.to_owned(),
                axis: axis_name.clone(),
            });
        }
    }

    let field = &definition.cast.field;
    if !first.contains_key(field) {
        return Err(ChartError::FieldNotFound {
            chart: chart.to_owned(),
            field: field.clone(),
            owner: FieldOwner::Cast,
        });
    }

    for character in &definition.cast.characters {
        let found = definition
            .data
            .iter()
            .any(|record| record.get(field).is_some_and(|value| value.selects(&character.name)));
        if !found {
            return Err(ChartError::SeriesNotFound {
                chart: chart.to_owned(),
                series: character.name.clone(),
                field: field.clone(),
            });
        }
    }

    Ok(chart)
}
